//! Diagnosis coding: dictionary lookup, code mapping, evaluation, reporting.

pub mod dictionary;
pub mod evaluate;
pub mod mapper;
pub mod report;
