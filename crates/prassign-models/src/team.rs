use serde::{Deserialize, Serialize};

use crate::User;

/// Team roster entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    pub fn into_user(self, team_name: &str) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            team_name: team_name.into(),
            is_active: self.is_active,
        }
    }
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn active_members(&self) -> impl Iterator<Item = &TeamMember> {
        self.members.iter().filter(|m| m.is_active)
    }

    pub fn inactive_members(&self) -> impl Iterator<Item = &TeamMember> {
        self.members.iter().filter(|m| !m.is_active)
    }
}
