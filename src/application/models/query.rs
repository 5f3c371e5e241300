use serde::Serialize;

/// Page/limit pair used by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub(crate) fn query(&self) -> String {
        format!("page={}&limit={}", self.page, self.limit)
    }
}

/// Filter for the marks-based college search. Absent and zero values are
/// left out of the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarksFilter {
    pub total_marks: Option<f64>,
    pub gpa: Option<f64>,
}

impl MarksFilter {
    pub(crate) fn query(&self) -> Option<String> {
        let mut params = Vec::new();
        if let Some(total_marks) = self.total_marks.filter(|v| *v != 0.0) {
            params.push(format!("totalMarks={total_marks}"));
        }
        if let Some(gpa) = self.gpa.filter(|v| *v != 0.0) {
            params.push(format!("gpa={gpa}"));
        }
        if params.is_empty() {
            None
        } else {
            Some(params.join("&"))
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CoursePreference<'a> {
    #[serde(rename = "courseId")]
    pub(crate) course_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdate<'a> {
    pub(crate) role: &'a str,
}
