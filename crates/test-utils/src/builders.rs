#![allow(dead_code)]

use termdag::catalog::{Course, PlanConstraints};

/// Builder for `Course` to simplify test setup.
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            course: Course {
                id: id.to_string(),
                name: None,
                credits: 0,
                prerequisites: vec![],
                corequisites: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.course.name = Some(name.to_string());
        self
    }

    pub fn credits(mut self, credits: u32) -> Self {
        self.course.credits = credits;
        self
    }

    pub fn prereq(mut self, id: &str) -> Self {
        self.course.prerequisites.push(id.to_string());
        self
    }

    pub fn coreq(mut self, id: &str) -> Self {
        self.course.corequisites.push(id.to_string());
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}

/// Builder for a full engine input: a course list plus constraints.
pub struct CatalogBuilder {
    courses: Vec<Course>,
    constraints: PlanConstraints,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            courses: Vec::new(),
            constraints: PlanConstraints::default(),
        }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn cap(mut self, cap: u32) -> Self {
        self.constraints.max_credits_per_term = cap;
        self
    }

    pub fn min_credits(mut self, min: u32) -> Self {
        self.constraints.min_credits_per_term = Some(min);
        self
    }

    pub fn max_terms(mut self, max: u32) -> Self {
        self.constraints.max_terms = Some(max);
        self
    }

    pub fn enforce_coreq_together(mut self, val: bool) -> Self {
        self.constraints.enforce_coreq_together = val;
        self
    }

    pub fn build(self) -> (Vec<Course>, PlanConstraints) {
        (self.courses, self.constraints)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
