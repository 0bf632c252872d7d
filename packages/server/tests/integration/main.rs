mod blog;
mod certificate;
mod common;
mod experience;
mod project;
mod site;
mod skill;
