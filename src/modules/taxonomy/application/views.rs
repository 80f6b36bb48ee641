//! The derived aggregation views the dashboard pages subscribe to.
//!
//! Every view is a left join, so parents with no children still show up
//! with a zero count. The domains view counts only active curriculums;
//! the other views count children regardless of their active flag — the
//! per-view policy is deliberate and must stay per view.

use serde::Serialize;

use crate::shared::store::{AggregationView, EntityStore, JoinKind};

use super::super::domain::{Curriculum, EducationDomain, Grade, Level, Subject};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainWithCurriculumsCount {
    #[serde(flatten)]
    pub domain: EducationDomain,
    pub curriculums_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumWithLevelsCount {
    #[serde(flatten)]
    pub curriculum: Curriculum,
    pub levels_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelWithGradesCount {
    #[serde(flatten)]
    pub level: Level,
    pub grades_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeWithSubjectsCount {
    #[serde(flatten)]
    pub grade: Grade,
    pub subjects_count: u64,
}

/// Domains with their count of *active* curriculums.
pub fn domain_with_curriculums_count(
    domains: &EntityStore<EducationDomain>,
    curriculums: &EntityStore<Curriculum>,
) -> AggregationView<EducationDomain, Curriculum, DomainWithCurriculumsCount> {
    AggregationView::new(
        "domain-with-curriculums-count",
        domains.clone(),
        curriculums.clone(),
        |c| c.domain_id,
        JoinKind::Left,
        |domain, count| DomainWithCurriculumsCount {
            domain: domain.clone(),
            curriculums_count: count,
        },
    )
    .with_filter(|c| c.is_active)
}

/// Curriculums with their count of levels (active or not).
pub fn curriculum_with_levels_count(
    curriculums: &EntityStore<Curriculum>,
    levels: &EntityStore<Level>,
) -> AggregationView<Curriculum, Level, CurriculumWithLevelsCount> {
    AggregationView::new(
        "curriculum-with-levels-count",
        curriculums.clone(),
        levels.clone(),
        |l| l.curriculum_id,
        JoinKind::Left,
        |curriculum, count| CurriculumWithLevelsCount {
            curriculum: curriculum.clone(),
            levels_count: count,
        },
    )
}

/// Levels with their count of grades (active or not).
pub fn level_with_grades_count(
    levels: &EntityStore<Level>,
    grades: &EntityStore<Grade>,
) -> AggregationView<Level, Grade, LevelWithGradesCount> {
    AggregationView::new(
        "level-with-grades-count",
        levels.clone(),
        grades.clone(),
        |g| g.level_id,
        JoinKind::Left,
        |level, count| LevelWithGradesCount {
            level: level.clone(),
            grades_count: count,
        },
    )
}

/// Grades with their count of subjects (active or not).
pub fn grade_with_subjects_count(
    grades: &EntityStore<Grade>,
    subjects: &EntityStore<Subject>,
) -> AggregationView<Grade, Subject, GradeWithSubjectsCount> {
    AggregationView::new(
        "grade-with-subjects-count",
        grades.clone(),
        subjects.clone(),
        |s| s.grade_id,
        JoinKind::Left,
        |grade, count| GradeWithSubjectsCount {
            grade: grade.clone(),
            subjects_count: count,
        },
    )
}

/// All four dashboard views, wired against one set of stores.
pub struct TaxonomyViews {
    pub domains_with_curriculums:
        AggregationView<EducationDomain, Curriculum, DomainWithCurriculumsCount>,
    pub curriculums_with_levels: AggregationView<Curriculum, Level, CurriculumWithLevelsCount>,
    pub levels_with_grades: AggregationView<Level, Grade, LevelWithGradesCount>,
    pub grades_with_subjects: AggregationView<Grade, Subject, GradeWithSubjectsCount>,
}

impl TaxonomyViews {
    pub fn new(stores: &super::stores::TaxonomyStores) -> Self {
        Self {
            domains_with_curriculums: domain_with_curriculums_count(
                &stores.domains,
                &stores.curriculums,
            ),
            curriculums_with_levels: curriculum_with_levels_count(
                &stores.curriculums,
                &stores.levels,
            ),
            levels_with_grades: level_with_grades_count(&stores.levels, &stores.grades),
            grades_with_subjects: grade_with_subjects_count(&stores.grades, &stores.subjects),
        }
    }
}
