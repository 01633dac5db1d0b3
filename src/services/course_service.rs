use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Course,
        dto::{
            request::{CreateCourseRequest, UpdateCourseByIdRequest},
            response::{CourseResponse, ProgressResponse},
        },
    },
    repositories::{CourseRepository, QuizRepository, UserRepository},
    services::chapter_service::progress_of,
};

pub struct CourseService {
    course_repository: Arc<dyn CourseRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl CourseService {
    pub fn new(
        course_repository: Arc<dyn CourseRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            course_repository,
            quiz_repository,
            user_repository,
        }
    }

    pub async fn get_course_by_id(&self, id: &str) -> AppResult<CourseResponse> {
        let course = self
            .course_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CourseNotFound)?;
        Ok(course.into())
    }

    pub async fn get_courses_by_curriculum_id(
        &self,
        curriculum_id: &str,
    ) -> AppResult<Vec<CourseResponse>> {
        let courses = self
            .course_repository
            .find_all_by_curriculum_id(curriculum_id)
            .await?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    pub async fn get_progress_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<ProgressResponse> {
        let (quizzes, user) = futures::try_join!(
            self.quiz_repository.find_all_by_course_id(id),
            self.user_repository.find_by_id(user_id),
        )?;
        let user = user.ok_or(AppError::UserNotFound)?;

        Ok(progress_of(
            &quizzes.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(),
            &user,
        ))
    }

    pub async fn create_course(&self, request: CreateCourseRequest) -> AppResult<CourseResponse> {
        let course = Course::new(&request.title, &request.image, &request.curriculum_id);
        let course = self.course_repository.save(course).await?;
        Ok(course.into())
    }

    pub async fn update_course_by_id(
        &self,
        id: &str,
        request: UpdateCourseByIdRequest,
    ) -> AppResult<CourseResponse> {
        let mut course = self
            .course_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        course.title = request.title;
        course.image = request.image;

        let course = self.course_repository.save(course).await?;
        Ok(course.into())
    }

    pub async fn delete_course_by_id(&self, id: &str) -> AppResult<()> {
        self.course_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::CourseNotFound)?;
        self.course_repository.delete_by_id(id).await
    }
}
