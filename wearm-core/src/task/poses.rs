//! Stored poses and task table

use crate::config::ACTUATOR_COUNT;

/// Target angle of every actuator, by id
pub type Pose = [u16; ACTUATOR_COUNT];

pub const HOME: Pose = [190, 130, 130, 130, 130, 130];
pub const READY_TO_PICK: Pose = [190, 110, 180, 150, 130, 100];
pub const PICK: Pose = [190, 85, 175, 190, 130, 100];
pub const GRASP: Pose = [190, 85, 175, 190, 130, 140];
pub const LIFT_UP: Pose = [190, 110, 180, 150, 130, 140];
pub const READY_TO_PLACE: Pose = [230, 110, 180, 150, 130, 140];
pub const PLACE: Pose = [230, 85, 175, 190, 130, 140];
pub const RELEASE: Pose = [230, 85, 175, 190, 130, 100];
pub const RETREAT: Pose = [190, 130, 130, 130, 130, 130];

/// Pick an object at the front and drop it to the side
pub const PICK_AND_PLACE: [Pose; 10] = [
    HOME,
    READY_TO_PICK,
    PICK,
    GRASP,
    LIFT_UP,
    READY_TO_PLACE,
    PLACE,
    RELEASE,
    RETREAT,
    HOME,
];

/// Number of task ids accepted by `run`
pub const TASK_COUNT: usize = 2;

/// Known task ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    PickAndPlace = 0,
    /// Reserved; no sequence yet
    Dance = 1,
}

impl TaskId {
    /// Look up a task by its protocol index
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(TaskId::PickAndPlace),
            1 => Some(TaskId::Dance),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Waypoints of this task, if it has any
    pub fn sequence(self) -> Option<&'static [Pose]> {
        match self {
            TaskId::PickAndPlace => Some(&PICK_AND_PLACE),
            TaskId::Dance => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::calibration::DEFAULT_CALIBRATION;

    #[test]
    fn test_from_index() {
        assert_eq!(TaskId::from_index(0), Some(TaskId::PickAndPlace));
        assert_eq!(TaskId::from_index(1), Some(TaskId::Dance));
        assert_eq!(TaskId::from_index(TASK_COUNT as i32), None);
        assert_eq!(TaskId::from_index(-1), None);
        assert_eq!(TaskId::from_index(99), None);
    }

    #[test]
    fn test_pick_and_place_returns_home() {
        let seq = TaskId::PickAndPlace.sequence().unwrap();
        assert_eq!(seq.len(), 10);
        assert_eq!(seq.first(), Some(&HOME));
        assert_eq!(seq.last(), Some(&HOME));
        assert!(TaskId::Dance.sequence().is_none());
    }

    #[test]
    fn test_poses_within_factory_windows() {
        for pose in PICK_AND_PLACE.iter() {
            for (angle, cal) in pose.iter().zip(DEFAULT_CALIBRATION.iter()) {
                assert!(*angle >= cal.angle_min && *angle <= cal.angle_max);
            }
        }
    }
}
