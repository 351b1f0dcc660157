/// Filesystem adapters for reading workspace snapshots
mod snapshot_reader;

pub use snapshot_reader::FileSystemSnapshotReader;
