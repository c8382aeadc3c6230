//! Compose assembly: the database factory, the service table, and the
//! dev / prod assemblers that evaluate it.

pub mod database;
pub mod dev;
pub mod model;
pub mod prod;
pub mod table;

pub use database::DatabaseServiceFactory;
pub use dev::DevComposeAssembler;
pub use model::{
    BuildContext, ComposeDocument, DeployPolicy, ImageSource, NetworkDefinition, RenderError,
    RestartCondition, RestartMode, RestartPolicy, ServiceDefinition, ServiceGraph,
    VolumeDefinition,
};
pub use prod::ProdComposeAssembler;
pub use table::ServiceTable;
