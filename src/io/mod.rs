mod local;

pub use local::LocalPackageFile;
