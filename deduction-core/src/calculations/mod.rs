//! Deduction calculations under the Japanese income tax rules.
//!
//! This module provides the calculation logic for the medical-expense
//! deduction worksheet, along with shared rounding helpers.

pub mod common;
pub mod medical_expenses;

pub use medical_expenses::{
    MedicalDeductionConfig, MedicalDeductionError, MedicalDeductionResult,
    MedicalDeductionWorksheet,
};
