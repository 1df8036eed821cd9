pub mod dump_writer;
pub mod dumper;
pub mod file_reader;
pub mod report;

pub use dump_writer::{entry_len, DumpWriter, ENTRY_SEPARATOR};
pub use dumper::{DumpEvent, DumpProgress, Dumper};
pub use file_reader::{classify, FileOutcome};
pub use report::{ConfigSnapshot, DumpReport};
