//! Integration tests for content tree aggregation and redaction

mod aggregation;
mod drafts;
mod failure;
mod owner_boundary;
mod properties;
mod search;
mod support;
