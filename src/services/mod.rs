pub mod processor;

pub use processor::{CompositeOperator, ImageInfo, Operation, Processor};
