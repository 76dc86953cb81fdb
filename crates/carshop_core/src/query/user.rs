//! User filter and sort tables.

use super::{FilterBinding, FilterQuery, QueryDispatcher, SortBinding};
use crate::model::user::User;
use crate::model::EntityKind;
use crate::repo::user_repo::UserRepository;

pub const USER_KEY_NAME: &str = "name";
pub const USER_KEY_AGE: &str = "age";
pub const USER_KEY_CITY: &str = "city";

impl<R: UserRepository + ?Sized> QueryDispatcher<R, User> {
    /// Dispatcher over `name` (text), `age` (integer) and `city` (text),
    /// with ascending sorts on the same three keys.
    pub fn users() -> Self {
        Self::new(
            EntityKind::User,
            vec![
                FilterBinding::new(USER_KEY_NAME, FilterQuery::Text(R::find_by_name)),
                FilterBinding::new(USER_KEY_AGE, FilterQuery::Integer(R::find_by_age)),
                FilterBinding::new(USER_KEY_CITY, FilterQuery::Text(R::find_by_city)),
            ],
            vec![
                SortBinding::new(USER_KEY_NAME, R::find_all_sorted_by_name),
                SortBinding::new(USER_KEY_AGE, R::find_all_sorted_by_age),
                SortBinding::new(USER_KEY_CITY, R::find_all_sorted_by_city),
            ],
        )
    }
}
