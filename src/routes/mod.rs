pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Wires the `/api` scope. Auth endpoints stay public; the entity scopes are
/// each placed behind the access-control gate.
pub fn config(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware::new(jwt_secret))
            .service(tasks::get_task_statistics)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/users")
            .wrap(AuthMiddleware::new(jwt_secret))
            .service(users::get_users)
            .service(users::get_user_with_tasks)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/categories")
            .wrap(AuthMiddleware::new(jwt_secret))
            .service(categories::get_categories_with_counts)
            .service(categories::get_categories)
            .service(categories::create_category)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category),
    );
}
