//! Fact extraction from plain CV text
//!
//! The three extractors are independent of each other and hold no mutable
//! state, so one CV can be run through them in any order or concurrently.

pub mod contact;
pub mod experience;
pub mod skills;

pub use contact::{ContactExtractor, ContactInfo};
pub use experience::{ExperienceExtractor, ExperienceInfo, ExperienceLevel};
pub use skills::{ExtractedSkills, SkillExtractor};
