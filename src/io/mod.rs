pub mod fs;
pub mod reader;
pub mod writer;

pub use fs::{file_name, is_markdown, is_path, remove_file_extension, resolve_files};
pub use reader::{remove_front_matter, FrontMatterReader, ReaderConfig};
pub use writer::{FrontMatterWriter, WriteOptions, WriteResult, WriterConfig};
