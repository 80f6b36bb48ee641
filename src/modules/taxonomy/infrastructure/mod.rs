pub mod api;

pub use api::{CurriculumRemote, CurriculumsApi, DomainsApi, GradesApi, LevelsApi, SubjectsApi};
