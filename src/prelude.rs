//! Exports the standard optimizers and traits.
//! 
pub use crate::optimizer::{
    // Optimizer trait
    Optimizer,
    Recorder,


    // Epoch-restart primal-dual method
    FSAUC,
    FsaucParams,


    // Bernstein primal-dual method
    SAUC,
    SaucParams,
};


pub use crate::common::SurrogateLoss;


pub use crate::sample::{
    Sample,
    sequential_passes,
    shuffled_passes,
    gaussian_clusters,
};


pub use crate::hypothesis::LinearScorer;


pub use crate::research::{
    Logger,
    LoggerBuilder,
    RecordSchedule,
    Trace,
    roc_auc,
};
