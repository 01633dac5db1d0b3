use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoChapterRepository, MongoCourseRepository, MongoCurriculumRepository,
        MongoQuizRepository, MongoTokenRepository, MongoUserRepository,
    },
    services::{
        oauth2::{AppleOAuth2Client, GoogleOAuth2Client, KakaoOAuth2Client},
        AuthenticationService, ChapterService, CourseService, CurriculumService, QuizService,
        UserService,
    },
};

pub struct OAuth2Clients {
    pub google: GoogleOAuth2Client,
    pub kakao: KakaoOAuth2Client,
    pub apple: AppleOAuth2Client,
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthenticationService>,
    pub chapter_service: Arc<ChapterService>,
    pub course_service: Arc<CourseService>,
    pub curriculum_service: Arc<CurriculumService>,
    pub oauth2: Arc<OAuth2Clients>,
    pub jwt_service: Arc<JwtService>,
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;
        let chapter_repository = Arc::new(MongoChapterRepository::new(&db));
        chapter_repository.ensure_indexes().await?;
        let course_repository = Arc::new(MongoCourseRepository::new(&db));
        course_repository.ensure_indexes().await?;
        let curriculum_repository = Arc::new(MongoCurriculumRepository::new(&db));
        curriculum_repository.ensure_indexes().await?;
        let token_repository = Arc::new(MongoTokenRepository::new(&db));
        token_repository.ensure_indexes().await?;

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.access_token_expire_hours,
            config.refresh_token_expire_hours,
        ));

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            chapter_repository.clone(),
            course_repository.clone(),
            user_repository.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            quiz_repository.clone(),
            token_repository.clone(),
        ));
        let auth_service = Arc::new(AuthenticationService::new(
            user_repository.clone(),
            token_repository,
            jwt_service.clone(),
        ));
        let chapter_service = Arc::new(ChapterService::new(
            chapter_repository,
            quiz_repository.clone(),
            user_repository.clone(),
        ));
        let course_service = Arc::new(CourseService::new(
            course_repository,
            quiz_repository.clone(),
            user_repository.clone(),
        ));
        let curriculum_service = Arc::new(CurriculumService::new(
            curriculum_repository,
            quiz_repository,
            user_repository,
        ));

        let oauth2 = Arc::new(OAuth2Clients {
            google: GoogleOAuth2Client::new(
                &config.google_client_id,
                config.google_client_secret.clone(),
            ),
            kakao: KakaoOAuth2Client::new(
                &config.kakao_client_id,
                config.kakao_client_secret.clone(),
            ),
            apple: AppleOAuth2Client::new(
                &config.apple_client_id,
                &config.apple_team_id,
                &config.apple_key_id,
                config.apple_private_key.clone(),
            ),
        });

        Ok(Self {
            quiz_service,
            user_service,
            auth_service,
            chapter_service,
            course_service,
            curriculum_service,
            oauth2,
            jwt_service,
            db: Arc::new(db),
            config: Arc::new(config),
        })
    }
}
