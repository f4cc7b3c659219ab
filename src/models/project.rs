use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    #[sqlx(rename = "idProject")]
    pub id: i32,
    pub title: String,
    #[sqlx(rename = "isDone")]
    pub is_done: bool,
    #[sqlx(rename = "deadlineDate")]
    pub deadline_date: chrono::NaiveDate,
}

/// Payload for `insert_project`; the id is assigned by the database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
    pub deadline_date: chrono::NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_project_defaults_to_not_done() {
        let project: NewProject =
            serde_json::from_str(r#"{"title":"Sprint 1","deadline_date":"2024-03-01"}"#)
                .expect("should deserialize");
        assert!(!project.is_done);
        assert_eq!(project.deadline_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn project_serializes_deadline_as_iso_date() {
        let project = Project {
            id: 7,
            title: "Backlog grooming".to_string(),
            is_done: true,
            deadline_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        };
        let json = serde_json::to_value(&project).expect("should serialize");
        assert_eq!(json["deadline_date"], "2024-12-31");
        assert_eq!(json["id"], 7);
    }
}
