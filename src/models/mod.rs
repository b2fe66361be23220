//! Data models for employee records and the add-employee draft.

pub mod employee;

pub use employee::{EmployeeRecord, FormDraft};
