use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Curriculum,
        dto::{
            request::{CreateCurriculumRequest, UpdateCurriculumByIdRequest},
            response::{CurriculumResponse, ProgressResponse},
        },
    },
    repositories::{CurriculumRepository, QuizRepository, UserRepository},
    services::chapter_service::progress_of,
};

pub struct CurriculumService {
    curriculum_repository: Arc<dyn CurriculumRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl CurriculumService {
    pub fn new(
        curriculum_repository: Arc<dyn CurriculumRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            curriculum_repository,
            quiz_repository,
            user_repository,
        }
    }

    pub async fn get_curriculum_by_id(&self, id: &str) -> AppResult<CurriculumResponse> {
        let curriculum = self
            .curriculum_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CurriculumNotFound)?;
        Ok(curriculum.into())
    }

    pub async fn get_curriculums(&self) -> AppResult<Vec<CurriculumResponse>> {
        let curricula = self.curriculum_repository.find_all().await?;
        Ok(curricula.into_iter().map(CurriculumResponse::from).collect())
    }

    pub async fn get_progress_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<ProgressResponse> {
        let (quizzes, user) = futures::try_join!(
            self.quiz_repository.find_all_by_curriculum_id(id),
            self.user_repository.find_by_id(user_id),
        )?;
        let user = user.ok_or(AppError::UserNotFound)?;

        Ok(progress_of(
            &quizzes.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(),
            &user,
        ))
    }

    pub async fn create_curriculum(
        &self,
        request: CreateCurriculumRequest,
    ) -> AppResult<CurriculumResponse> {
        let curriculum = Curriculum::new(&request.title, &request.image);
        let curriculum = self.curriculum_repository.save(curriculum).await?;
        Ok(curriculum.into())
    }

    pub async fn update_curriculum_by_id(
        &self,
        id: &str,
        request: UpdateCurriculumByIdRequest,
    ) -> AppResult<CurriculumResponse> {
        let mut curriculum = self
            .curriculum_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CurriculumNotFound)?;

        curriculum.title = request.title;
        curriculum.image = request.image;

        let curriculum = self.curriculum_repository.save(curriculum).await?;
        Ok(curriculum.into())
    }

    pub async fn delete_curriculum_by_id(&self, id: &str) -> AppResult<()> {
        self.curriculum_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CurriculumNotFound)?;
        self.curriculum_repository.delete_by_id(id).await
    }
}
