use chrono::NaiveDateTime;

use qalam_admin::modules::taxonomy::{Curriculum, EducationDomain, Grade, Level, Subject};

pub fn created_at() -> NaiveDateTime {
    "2026-01-29T03:16:58.38936".parse().unwrap()
}

/// Record as built from a create form: placeholder id, provisional date.
pub fn domain_draft_record(code: &str, name_en: &str) -> EducationDomain {
    domain(0, code, name_en)
}

pub fn domain(id: i64, code: &str, name_en: &str) -> EducationDomain {
    EducationDomain {
        id,
        name_ar: format!("مجال {}", id),
        name_en: name_en.to_string(),
        code: code.to_string(),
        description_ar: String::new(),
        description_en: format!("{} description", name_en),
        created_at: created_at(),
    }
}

pub fn curriculum(id: i64, domain_id: i64, is_active: bool) -> Curriculum {
    Curriculum {
        id,
        name_ar: format!("منهج {}", id),
        name_en: format!("Curriculum {}", id),
        country: "SA".to_string(),
        domain_id,
        description_ar: String::new(),
        description_en: String::new(),
        is_active,
        created_at: created_at(),
    }
}

pub fn level(id: i64, curriculum_id: i64, is_active: bool) -> Level {
    Level {
        id,
        curriculum_id,
        name_ar: format!("مرحلة {}", id),
        name_en: format!("Level {}", id),
        order_index: id as i32,
        is_active,
        created_at: created_at(),
    }
}

pub fn grade(id: i64, level_id: i64, is_active: bool) -> Grade {
    Grade {
        id,
        level_id,
        name_ar: format!("صف {}", id),
        name_en: format!("Grade {}", id),
        order_index: id as i32,
        is_active,
        created_at: created_at(),
    }
}

pub fn subject(id: i64, level_id: i64, grade_id: i64, is_active: bool) -> Subject {
    Subject {
        id,
        level_id,
        grade_id,
        term_id: None,
        name_ar: format!("مادة {}", id),
        name_en: format!("Subject {}", id),
        description_ar: String::new(),
        description_en: String::new(),
        is_active,
        created_at: created_at(),
    }
}
