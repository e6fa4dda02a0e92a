//! REST surface consumed by the browser client.
//!
//! | Method | Path                 | Success                       |
//! |--------|----------------------|-------------------------------|
//! | GET    | `/api/files`         | `200` JSON array of records   |
//! | POST   | `/api/files/upload`  | `201` stored record           |
//! | GET    | `/api/files/{id}`    | `200` bytes, as attachment    |
//! | DELETE | `/api/files/{id}`    | `204`                         |

mod error;
mod store;

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::http::header::ContentDisposition;
use actix_web::middleware::DefaultHeaders;
use actix_web::{delete, get, guard, mime, post, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt as _;

pub use error::ApiError;
pub use store::{FileStore, PendingUpload, StoreError, StoredFile};

pub const API_BASE: &str = "/api/files";

/// Registers the file routes under [`API_BASE`]. Expects a `web::Data<FileStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_BASE)
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .service(list_files)
            .service(upload_file)
            .service(download_file)
            .service(delete_file)
            .service(
                web::resource("/{tail:.*}")
                    .guard(guard::Options())
                    .to(|| async { HttpResponse::NoContent().finish() }),
            ),
    );
}

fn download_base(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), API_BASE)
}

#[get("")]
async fn list_files(store: web::Data<FileStore>, req: HttpRequest) -> HttpResponse {
    let base = download_base(&req);
    let records: Vec<_> = store
        .list()
        .await
        .iter()
        .map(|file| file.to_record(&base))
        .collect();
    HttpResponse::Ok().json(records)
}

#[post("/upload")]
async fn upload_file(
    store: web::Data<FileStore>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    while let Some(mut field) = payload.try_next().await.map_err(bad_upload)? {
        let Some(disposition) = field.content_disposition() else {
            continue;
        };
        if disposition.get_name() != Some("file") {
            continue;
        }
        let file_name = disposition.get_filename().unwrap_or_default().to_string();
        let file_type = field.content_type().map(|mime| mime.to_string());

        let mut upload = store.begin(&file_name).await?;
        if let Err(e) = stream_into(&mut field, &mut upload).await {
            upload.discard().await;
            return Err(e);
        }
        let stored = store.commit(upload, file_type).await?;
        return Ok(HttpResponse::Created().json(stored.to_record(&download_base(&req))));
    }
    Err(ApiError::BadUpload(
        "Required part 'file' is not present".to_string(),
    ))
}

async fn stream_into(
    field: &mut actix_multipart::Field,
    upload: &mut PendingUpload,
) -> Result<(), ApiError> {
    while let Some(chunk) = field.try_next().await.map_err(bad_upload)? {
        upload.write(&chunk).await?;
    }
    Ok(())
}

fn bad_upload(e: actix_multipart::MultipartError) -> ApiError {
    ApiError::BadUpload(e.to_string())
}

#[get("/{id}")]
async fn download_file(
    store: web::Data<FileStore>,
    path: web::Path<u64>,
) -> Result<NamedFile, ApiError> {
    let (file, blob) = store.locate(path.into_inner()).await?;
    let content_type = file
        .file_type
        .as_deref()
        .and_then(|t| t.parse::<mime::Mime>().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    let named = NamedFile::open_async(&blob)
        .await
        .map_err(StoreError::from)?
        .set_content_type(content_type)
        .set_content_disposition(ContentDisposition::attachment(file.file_name));
    Ok(named)
}

#[delete("/{id}")]
async fn delete_file(
    store: web::Data<FileStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    store.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
