use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::learning_path::handler::create_learning_path,
        crate::modules::learning_path::handler::list_learning_paths,
        crate::modules::learning_path::handler::get_learning_path,
        crate::modules::learning_path::handler::delete_learning_path,
        crate::modules::video::handler::get_video,
        crate::modules::video::handler::resolve_video_url,
        crate::modules::content::handler::start_import,
        crate::modules::content::handler::list_imports,
        crate::modules::content::handler::get_import_status,
        crate::modules::content::handler::complete_import,
    ),
    components(
        schemas(
            crate::common::response::ErrorBody,
            crate::modules::learning_path::dto::CreateLearningPathRequest,
            crate::modules::learning_path::model::LearningPath,
            crate::modules::video::dto::VideoUrlRequest,
            crate::modules::video::model::VideoMetadata,
            crate::modules::content::dto::StartImportRequest,
            crate::modules::content::dto::CompleteImportRequest,
            crate::modules::content::dto::ImportStatus,
            crate::modules::content::model::ContentRecord,
            crate::modules::content::model::ContentStatus,
        )
    ),
    tags(
        (name = "Learning Paths", description = "Learning path management"),
        (name = "YouTube", description = "Video metadata lookup"),
        (name = "Imports", description = "Content ingestion and status tracking")
    )
)]
pub struct ApiDoc;
