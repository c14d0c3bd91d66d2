pub mod calculations;

pub use calculations::{
    MedicalDeductionConfig, MedicalDeductionError, MedicalDeductionResult,
    MedicalDeductionWorksheet,
};
