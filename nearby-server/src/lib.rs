//! Nearby transit "leave by" server.
//!
//! A web application that answers: "which transit stops are near me,
//! when does the next vehicle leave, and how soon do I have to start
//! walking to catch it?"

pub mod domain;
pub mod nearby;
pub mod routing;
pub mod transit;
pub mod walk;
pub mod web;
