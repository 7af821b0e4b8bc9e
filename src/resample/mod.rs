mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapIter, BootstrapSample};
