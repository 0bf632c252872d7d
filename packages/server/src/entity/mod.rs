pub mod blog_post;
pub mod blog_tag;
pub mod certificate;
pub mod education;
pub mod education_achievement;
pub mod experience;
pub mod experience_responsibility;
pub mod experience_skill;
pub mod project;
pub mod project_tag;
pub mod section;
pub mod setting;
pub mod skill;
pub mod social_link;
pub mod testimonial;
