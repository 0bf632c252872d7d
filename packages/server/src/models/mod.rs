//! Request payloads, their validation, and response bodies.

pub mod blog;
pub mod certificate;
pub mod education;
pub mod experience;
pub mod project;
pub mod shared;
pub mod site;
pub mod skill;
pub mod testimonial;
