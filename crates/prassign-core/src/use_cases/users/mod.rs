pub(crate) mod list_user_reviews;
pub(crate) mod set_user_is_active;

pub use list_user_reviews::ListUserReviewsInterface;
pub use set_user_is_active::SetUserIsActiveInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    list_user_reviews::MockListUserReviewsInterface,
    set_user_is_active::MockSetUserIsActiveInterface,
};
