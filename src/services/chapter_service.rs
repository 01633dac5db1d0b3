use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Chapter,
        dto::{
            request::{CreateChapterRequest, UpdateChapterByIdRequest},
            response::{ChapterResponse, ProgressResponse},
        },
    },
    repositories::{ChapterRepository, QuizRepository, UserRepository},
};

pub struct ChapterService {
    chapter_repository: Arc<dyn ChapterRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ChapterService {
    pub fn new(
        chapter_repository: Arc<dyn ChapterRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            chapter_repository,
            quiz_repository,
            user_repository,
        }
    }

    pub async fn get_chapter_by_id(&self, id: &str) -> AppResult<ChapterResponse> {
        let chapter = self
            .chapter_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::ChapterNotFound)?;
        Ok(chapter.into())
    }

    pub async fn get_chapters_by_course_id(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<ChapterResponse>> {
        let chapters = self
            .chapter_repository
            .find_all_by_course_id_order_by_index(course_id)
            .await?;
        Ok(chapters.into_iter().map(ChapterResponse::from).collect())
    }

    /// Solved counts both correct and incorrect attempts; answering a quiz
    /// wrongly still counts as having faced it.
    pub async fn get_progress_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<ProgressResponse> {
        let (quizzes, user) = futures::try_join!(
            self.quiz_repository.find_all_by_chapter_id(id),
            self.user_repository.find_by_id(user_id),
        )?;
        let user = user.ok_or(AppError::UserNotFound)?;

        Ok(progress_of(&quizzes.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(), &user))
    }

    pub async fn create_chapter(&self, request: CreateChapterRequest) -> AppResult<ChapterResponse> {
        let chapter = Chapter::new(
            &request.description,
            &request.document,
            &request.course_id,
            &request.image,
            request.index,
        );
        let chapter = self.chapter_repository.save(chapter).await?;
        Ok(chapter.into())
    }

    pub async fn update_chapter_by_id(
        &self,
        id: &str,
        request: UpdateChapterByIdRequest,
    ) -> AppResult<ChapterResponse> {
        let mut chapter = self
            .chapter_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::ChapterNotFound)?;

        chapter.description = request.description;
        chapter.document = request.document;
        chapter.image = request.image;
        chapter.index = request.index;

        let chapter = self.chapter_repository.save(chapter).await?;
        Ok(chapter.into())
    }

    pub async fn delete_chapter_by_id(&self, id: &str) -> AppResult<()> {
        self.chapter_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::ChapterNotFound)?;
        self.chapter_repository.delete_by_id(id).await
    }
}

/// Shared progress arithmetic for chapter, course and curriculum scopes.
pub(crate) fn progress_of(
    container_quiz_ids: &[&str],
    user: &crate::models::domain::User,
) -> ProgressResponse {
    let solved = container_quiz_ids
        .iter()
        .filter(|id| {
            user.correct_quiz_ids.contains(**id) || user.incorrect_quiz_ids.contains(**id)
        })
        .count();

    ProgressResponse {
        total: container_quiz_ids.len(),
        solved,
    }
}
