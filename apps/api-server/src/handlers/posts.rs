//! Blog post CRUD handlers.

use actix_web::{HttpResponse, web};
use bson::oid::ObjectId;

use quill_core::domain::{Author, BlogPost, BlogPostUpdate, NewBlogPost};
use quill_core::ports::PostRepository;
use quill_shared::dto::{AuthorPayload, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let id = parse_id(&raw_id)?;

    match state.posts.find_by_id(id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(to_response(post))),
        None => Err(AppError::NotFound(format!(
            "Post with id {} not found",
            raw_id
        ))),
    }
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = validate_create(body.into_inner())?;
    let post = state.posts.insert(new_post).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
///
/// Replies 201 with the updated post. The body must repeat the path id;
/// a mismatch is rejected before the id is even parsed.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let path_id = path.into_inner();
    let req = body.into_inner();

    let body_id = req.id.clone().unwrap_or_default();
    if body_id != path_id {
        return Err(AppError::BadRequest(format!(
            "Request path id ({}) and request body id ({}) must match",
            path_id, body_id
        )));
    }

    let update = validate_update(req)?;
    let id = parse_id(&path_id)?;

    match state.posts.update(id, update).await? {
        Some(post) => Ok(HttpResponse::Created().json(to_response(post))),
        None => Err(AppError::NotFound(format!(
            "Post with id {} not found",
            path_id
        ))),
    }
}

/// DELETE /posts/{id}
///
/// Always replies 204. Unknown and malformed ids delete nothing.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    if let Ok(id) = ObjectId::parse_str(path.as_str()) {
        state.posts.delete(id).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid post id: {}", id)))
}

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        author: post.author.display_name(),
        title: post.title,
        content: post.content,
    }
}

/// Take a field that the contract requires, recording a problem when it is
/// absent or blank.
fn required(name: &str, value: Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            problems.push(format!("Missing `{}` in request body", name));
            None
        }
    }
}

fn author_from(payload: Option<AuthorPayload>, problems: &mut Vec<String>) -> Option<Author> {
    match payload {
        Some(author) => {
            let first_name = required("author.firstName", author.first_name, problems);
            let last_name = required("author.lastName", author.last_name, problems);
            match (first_name, last_name) {
                (Some(first_name), Some(last_name)) => Some(Author::new(first_name, last_name)),
                _ => None,
            }
        }
        None => {
            problems.push("Missing `author` in request body".to_string());
            None
        }
    }
}

fn validate_create(req: CreatePostRequest) -> Result<NewBlogPost, AppError> {
    let mut problems = Vec::new();

    let title = required("title", req.title, &mut problems);
    let content = required("content", req.content, &mut problems);
    let author = author_from(req.author, &mut problems);

    match (title, content, author) {
        (Some(title), Some(content), Some(author)) => Ok(NewBlogPost {
            author,
            title,
            content,
        }),
        _ => Err(AppError::Validation(problems)),
    }
}

fn validate_update(req: UpdatePostRequest) -> Result<BlogPostUpdate, AppError> {
    let mut problems = Vec::new();
    let mut update = BlogPostUpdate::default();

    // Absent fields are left alone; present fields must carry a value
    if req.title.is_some() {
        update.title = required("title", req.title, &mut problems);
    }
    if req.content.is_some() {
        update.content = required("content", req.content, &mut problems);
    }
    if req.author.is_some() {
        update.author = author_from(req.author, &mut problems);
    }

    if problems.is_empty() {
        Ok(update)
    } else {
        Err(AppError::Validation(problems))
    }
}
