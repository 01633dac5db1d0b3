use std::sync::Arc;

use crate::{
    auth::JwtAuthentication,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            request::{CheckAnswerRequest, CreateQuizRequest, UpdateQuizByIdRequest},
            response::{CheckAnswerResponse, QuizResponse},
        },
    },
    repositories::{ChapterRepository, CourseRepository, QuizRepository, UserRepository},
};

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    chapter_repository: Arc<dyn ChapterRepository>,
    course_repository: Arc<dyn CourseRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        chapter_repository: Arc<dyn ChapterRepository>,
        course_repository: Arc<dyn CourseRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            chapter_repository,
            course_repository,
            user_repository,
        }
    }

    pub async fn get_quiz_by_id(&self, id: &str) -> AppResult<QuizResponse> {
        let quiz = self
            .quiz_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        Ok(quiz.into())
    }

    pub async fn get_quizzes_by_chapter_id(&self, chapter_id: &str) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self.quiz_repository.find_all_by_chapter_id(chapter_id).await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    pub async fn get_quizzes_by_chapter_id_and_answer_rate_range(
        &self,
        chapter_id: &str,
        min_answer_rate: f64,
        max_answer_rate: f64,
        page: u64,
        size: i64,
    ) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self
            .quiz_repository
            .find_all_by_chapter_id_and_answer_rate_between(
                chapter_id,
                min_answer_rate,
                max_answer_rate,
                page,
                size,
            )
            .await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    pub async fn get_quizzes_by_course_id(&self, course_id: &str) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self.quiz_repository.find_all_by_course_id(course_id).await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    pub async fn get_quizzes_by_writer_id(&self, writer_id: &str) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self.quiz_repository.find_all_by_writer_id(writer_id).await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    pub async fn get_quizzes_by_question_contains(
        &self,
        keyword: &str,
    ) -> AppResult<Vec<QuizResponse>> {
        let quizzes = self
            .quiz_repository
            .find_all_by_question_contains(keyword)
            .await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    pub async fn get_marked_quizzes(&self, user_id: &str) -> AppResult<Vec<QuizResponse>> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let ids: Vec<String> = user.marked_quiz_ids.into_iter().collect();
        let quizzes = self.quiz_repository.find_all_by_id_in(ids).await?;
        Ok(quizzes.into_iter().map(QuizResponse::from).collect())
    }

    /// The course and curriculum ids are snapshotted from the chapter's
    /// course at creation time; later moves of the chapter do not rewrite
    /// existing quizzes.
    pub async fn create_quiz(
        &self,
        user_id: &str,
        request: CreateQuizRequest,
    ) -> AppResult<QuizResponse> {
        let chapter = self
            .chapter_repository
            .find_by_id(&request.chapter_id)
            .await?
            .ok_or(AppError::ChapterNotFound)?;

        let course = self
            .course_repository
            .find_by_id(&chapter.course_id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        let quiz = Quiz::new(
            &request.question,
            request.answer,
            &request.solution,
            user_id,
            &request.chapter_id,
            &course.id,
            &course.curriculum_id,
            request.options,
        );

        let quiz = self.quiz_repository.save(quiz).await?;
        Ok(quiz.into())
    }

    pub async fn update_quiz_by_id(
        &self,
        id: &str,
        authentication: &JwtAuthentication,
        request: UpdateQuizByIdRequest,
    ) -> AppResult<QuizResponse> {
        let mut quiz = self
            .quiz_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        if authentication.id != quiz.writer_id && !authentication.is_admin() {
            return Err(AppError::PermissionDenied);
        }

        quiz.question = request.question;
        quiz.answer = request.answer;
        quiz.solution = request.solution;
        quiz.options = request.options;

        let quiz = self.quiz_repository.save(quiz).await?;
        Ok(quiz.into())
    }

    /// Deletes the quiz and strips its id from every user's progress and
    /// bookmark sets. Whole-collection rewrite, O(total users); no rollback
    /// if a cascade write fails after the delete.
    pub async fn delete_quiz_by_id(
        &self,
        id: &str,
        authentication: &JwtAuthentication,
    ) -> AppResult<()> {
        let quiz = self
            .quiz_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        if authentication.id != quiz.writer_id && !authentication.is_admin() {
            return Err(AppError::PermissionDenied);
        }

        self.quiz_repository.delete_by_id(id).await?;

        let users = self.user_repository.find_all().await?;
        let affected: Vec<_> = users
            .into_iter()
            .filter(|user| {
                user.correct_quiz_ids.contains(id)
                    || user.incorrect_quiz_ids.contains(id)
                    || user.marked_quiz_ids.contains(id)
            })
            .map(|mut user| {
                user.correct_quiz_ids.remove(id);
                user.incorrect_quiz_ids.remove(id);
                user.marked_quiz_ids.remove(id);
                user
            })
            .collect();

        self.user_repository.save_all(affected).await?;
        Ok(())
    }

    /// Applies the submission to both the quiz counters and the user's
    /// progress sets. Both writes must land; there is no partial-commit
    /// recovery. The answer is revealed regardless of correctness.
    pub async fn check_answer(
        &self,
        id: &str,
        user_id: &str,
        request: CheckAnswerRequest,
    ) -> AppResult<CheckAnswerResponse> {
        let (quiz, user) = futures::try_join!(
            self.quiz_repository.find_by_id(id),
            self.user_repository.find_by_id(user_id),
        )?;

        let mut quiz = quiz.ok_or(AppError::QuizNotFound)?;
        let mut user = user.ok_or(AppError::UserNotFound)?;

        if request.answer == quiz.answer {
            quiz.correct_answer();
            user.correct_answer(id);
            user.check_level();
        } else {
            quiz.incorrect_answer();
            user.incorrect_answer(id);
        }

        let response = CheckAnswerResponse {
            answer: quiz.answer,
            solution: quiz.solution.clone(),
        };

        futures::try_join!(
            self.quiz_repository.save(quiz),
            self.user_repository.save(user),
        )?;

        Ok(response)
    }

    /// Bookmark toggle, mirrored on the quiz and the user.
    pub async fn mark_quiz(&self, id: &str, user_id: &str) -> AppResult<QuizResponse> {
        let (quiz, user) = futures::try_join!(
            self.quiz_repository.find_by_id(id),
            self.user_repository.find_by_id(user_id),
        )?;

        let mut quiz = quiz.ok_or(AppError::QuizNotFound)?;
        let mut user = user.ok_or(AppError::UserNotFound)?;

        if quiz.marked_user_ids.contains(user_id) {
            quiz.unmark(user_id);
            user.unmark_quiz(id);
        } else {
            quiz.mark(user_id);
            user.mark_quiz(id);
        }

        let (quiz, _) = futures::try_join!(
            self.quiz_repository.save(quiz),
            self.user_repository.save(user),
        )?;

        Ok(quiz.into())
    }

    /// Like/unlike toggle. A repeated vote retracts it; an opposing vote
    /// replaces it, so a user sits in at most one of the two sets.
    pub async fn evaluate_quiz(
        &self,
        id: &str,
        user_id: &str,
        is_like: bool,
    ) -> AppResult<QuizResponse> {
        let mut quiz = self
            .quiz_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        if is_like {
            if quiz.liked_user_ids.contains(user_id) {
                quiz.liked_user_ids.remove(user_id);
            } else {
                quiz.unliked_user_ids.remove(user_id);
                quiz.like(user_id);
            }
        } else if quiz.unliked_user_ids.contains(user_id) {
            quiz.unliked_user_ids.remove(user_id);
        } else {
            quiz.liked_user_ids.remove(user_id);
            quiz.unlike(user_id);
        }

        let quiz = self.quiz_repository.save(quiz).await?;
        Ok(quiz.into())
    }
}
