//! Declarative service table.
//!
//! Each row names a service, whether it is included, the peers it would
//! depend on, and how to build it. [`ServiceTable::assemble`] evaluates the
//! table once: excluded rows are dropped, and each included service keeps
//! only the candidate dependencies that are themselves included. A graph
//! built this way never has a dangling `depends_on` entry.

use std::collections::HashSet;

use super::model::{ServiceDefinition, ServiceGraph};

type Builder<'a> = Box<dyn FnOnce() -> ServiceDefinition + 'a>;

struct ServiceRow<'a> {
    name: String,
    included: bool,
    depends_on: Vec<String>,
    build: Builder<'a>,
}

/// Ordered table of conditional services.
#[derive(Default)]
pub struct ServiceTable<'a> {
    rows: Vec<ServiceRow<'a>>,
}

impl<'a> ServiceTable<'a> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a row. Rows are emitted in the order they are added.
    pub fn row(
        mut self,
        name: impl Into<String>,
        included: bool,
        depends_on: &[&str],
        build: impl FnOnce() -> ServiceDefinition + 'a,
    ) -> Self {
        self.rows.push(ServiceRow {
            name: name.into(),
            included,
            depends_on: depends_on.iter().map(|d| (*d).to_owned()).collect(),
            build: Box::new(build),
        });
        self
    }

    pub fn assemble(self) -> ServiceGraph {
        let present: HashSet<String> = self
            .rows
            .iter()
            .filter(|r| r.included)
            .map(|r| r.name.clone())
            .collect();

        let mut graph = ServiceGraph::new();
        for row in self.rows.into_iter().filter(|r| r.included) {
            let mut definition = (row.build)();
            definition.depends_on = row
                .depends_on
                .into_iter()
                .filter(|dep| present.contains(dep))
                .collect();

            tracing::debug!(
                service = %row.name,
                depends_on = ?definition.depends_on,
                "assembled service"
            );
            graph.insert(row.name, definition);
        }
        graph
    }
}
