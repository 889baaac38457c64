//! Time entry entity <-> model mapper

use sprint_core::entities::TimeEntry;
use sprint_core::value_objects::Snowflake;

use crate::models::TimeEntryModel;

impl From<TimeEntryModel> for TimeEntry {
    fn from(model: TimeEntryModel) -> Self {
        TimeEntry {
            id: Snowflake::new(model.id),
            task_id: Snowflake::new(model.task_id),
            user_id: Snowflake::new(model.user_id),
            minutes: model.minutes,
            start_time: model.start_time,
            end_time: model.end_time,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}
