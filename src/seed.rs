use diesel::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::favorite::{Favorite, FavoriteTableError};
use crate::models::feedback::{Feedback, FeedbackType};
use crate::models::item::{Item, NewItem};
use crate::models::user::{NewUser, User};

const CONDITIONS: &[&str] = &["New", "Like New", "Good", "Fair", "Needs Repair"];

const ITEM_NAMES: &[&str] = &[
    "Bookshelf", "Armchair", "Coffee Table", "Desk Lamp", "Bed Frame", "Dresser", "Microwave",
    "Toaster Oven", "Bar Stool", "Mirror", "Filing Cabinet", "Patio Chair", "Rug", "Monitor",
    "Crib", "Futon",
];

const STREETS: &[&str] = &[
    "Elm St", "Maple Ave", "Oak Dr", "Cedar Ln", "Birch Rd", "Willow Way", "Spruce Ct",
];

/// Clears the domain tables and repopulates them with sample data. Runs from
/// the `--seed` CLI flag against the configured database.
pub fn run(conn: &mut SqliteConnection) {
    println!("Starting seed...");

    clear_tables(conn);

    let users = create_users(conn, 10);
    let items = create_items(conn, 50, &users);
    let favorite_count = create_favorites(conn, 100, &users, &items);
    create_feedback(conn, 200, &users, &items);

    println!(
        "Database seeded successfully: {} users, {} items, {} favorites, 200 feedback rows",
        users.len(),
        items.len(),
        favorite_count
    );
}

fn clear_tables(conn: &mut SqliteConnection) {
    use crate::schema::{favorites, items, user_feedback, users};

    diesel::delete(user_feedback::table)
        .execute(conn)
        .expect("Failed to clear user_feedback");
    diesel::delete(favorites::table)
        .execute(conn)
        .expect("Failed to clear favorites");
    diesel::delete(items::table)
        .execute(conn)
        .expect("Failed to clear items");
    diesel::delete(users::table)
        .execute(conn)
        .expect("Failed to clear users");
}

fn create_users(conn: &mut SqliteConnection, n: usize) -> Vec<User> {
    (0..n)
        .map(|i| {
            let new_user = NewUser {
                email: format!("resident{}@example.com", i + 1),
                username: format!("resident{}", i + 1),
                password: format!("password{}", i + 1),
            };
            User::create(conn, &new_user).expect("Failed to seed user")
        })
        .collect()
}

fn create_items(conn: &mut SqliteConnection, n: usize, users: &[User]) -> Vec<Item> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|i| {
            let owner = users.choose(&mut rng).unwrap();
            let name = *ITEM_NAMES.choose(&mut rng).unwrap();
            let street = *STREETS.choose(&mut rng).unwrap();
            let new_item = NewItem {
                user_id: owner.id,
                name: name.to_string(),
                description: format!("{} free to a good home, first come first served", name),
                location: format!("{} {}", rng.gen_range(1..200), street),
                condition: CONDITIONS.choose(&mut rng).unwrap().to_string(),
                time_to_be_set_on_curb: chrono::Utc::now().timestamp() as i32
                    + rng.gen_range(3600..7 * 24 * 3600),
                image_path: format!("seed-{}.jpg", i + 1),
            };
            Item::create(conn, &new_item).expect("Failed to seed item")
        })
        .collect()
}

fn create_favorites(
    conn: &mut SqliteConnection,
    n: usize,
    users: &[User],
    items: &[Item],
) -> usize {
    let mut rng = rand::thread_rng();
    let mut created = 0;
    for _ in 0..n {
        let user = users.choose(&mut rng).unwrap();
        let item = items.choose(&mut rng).unwrap();
        match Favorite::add(conn, user.id, item.id) {
            Ok(_) => created += 1,
            // random pairs collide; the unique policy drops the repeats
            Err(FavoriteTableError::AlreadyFavorited) => {}
            Err(err) => panic!("Failed to seed favorite: {:?}", err),
        }
    }
    created
}

fn create_feedback(conn: &mut SqliteConnection, n: usize, users: &[User], items: &[Item]) {
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let user = users.choose(&mut rng).unwrap();
        let item = items.choose(&mut rng).unwrap();
        let feedback_type = if rng.gen_bool(0.5) {
            FeedbackType::Like
        } else {
            FeedbackType::Dislike
        };
        Feedback::submit(conn, user.id, item.id, feedback_type).expect("Failed to seed feedback");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::get_test_db_connection;

    #[test]
    fn test_seed_populates_tables() {
        let mut conn = get_test_db_connection();
        run(&mut conn);

        let items = Item::get_all(&mut conn).unwrap();
        assert_eq!(items.len(), 50);
        assert!(items
            .iter()
            .all(|item| CONDITIONS.contains(&item.condition.as_str())));
    }

    #[test]
    fn test_seed_is_rerunnable() {
        let mut conn = get_test_db_connection();
        run(&mut conn);
        run(&mut conn);

        assert_eq!(Item::get_all(&mut conn).unwrap().len(), 50);
    }
}
