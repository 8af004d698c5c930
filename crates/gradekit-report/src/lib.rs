//! gradekit-report — Text and HTML report rendering.
//!
//! Renders a finished [`gradekit_core::report::GradeReport`] into shareable
//! artifacts. Rendering is read-only: nothing here feeds back into scoring.

pub mod html;
pub mod text;
