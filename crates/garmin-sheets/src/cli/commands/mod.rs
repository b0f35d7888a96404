pub mod sync;
pub mod zones;

pub use sync::run as sync_run;
pub use zones::show as show_zones;
