use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    auth::JwtAuthentication,
    errors::{AppError, AppResult},
    models::{
        domain::{Provider, User},
        dto::{
            request::{CreateUserRequest, UpdateUserByIdRequest},
            response::UserResponse,
        },
    },
    repositories::{QuizRepository, TokenRepository, UserRepository},
};

pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    token_repository: Arc<dyn TokenRepository>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        token_repository: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            user_repository,
            quiz_repository,
            token_repository,
        }
    }

    /// All users ordered by correct-answer count, highest first. Ties fall
    /// back to user id so the ordering is stable across calls.
    pub async fn get_ranking(&self) -> AppResult<Vec<UserResponse>> {
        let mut users = self.user_repository.find_all().await?;
        users.sort_by(|a, b| {
            b.correct_quiz_ids
                .len()
                .cmp(&a.correct_quiz_ids.len())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Ranking scoped to one course: only users with at least one correct
    /// answer among the course's quizzes appear, ordered by that count.
    pub async fn get_ranking_by_course_id(&self, course_id: &str) -> AppResult<Vec<UserResponse>> {
        let quizzes = self.quiz_repository.find_all_by_course_id(course_id).await?;
        let course_quiz_ids: HashSet<String> =
            quizzes.into_iter().map(|quiz| quiz.id).collect();

        let users = self.user_repository.find_all().await?;
        let mut ranked: Vec<(usize, User)> = users
            .into_iter()
            .filter_map(|user| {
                let solved = user
                    .correct_quiz_ids
                    .intersection(&course_quiz_ids)
                    .count();
                (solved > 0).then_some((solved, user))
            })
            .collect();
        ranked.sort_by(|(a_solved, a), (b_solved, b)| {
            b_solved.cmp(a_solved).then_with(|| a.id.cmp(&b.id))
        });

        Ok(ranked
            .into_iter()
            .map(|(_, user)| UserResponse::from(user))
            .collect())
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse> {
        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(user.into())
    }

    pub async fn get_user_by_authentication(
        &self,
        authentication: &JwtAuthentication,
    ) -> AppResult<UserResponse> {
        self.get_user_by_id(&authentication.id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<UserResponse> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(user.into())
    }

    pub async fn get_user_by_email_and_provider(
        &self,
        email: &str,
        provider: Provider,
    ) -> AppResult<UserResponse> {
        let user = self
            .user_repository
            .find_by_email_and_provider(email, provider)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(user.into())
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        if self
            .user_repository
            .find_by_email_and_provider(&request.email, request.provider)
            .await?
            .is_some()
        {
            return Err(AppError::UserAlreadyExists);
        }

        let user = User::new(
            &request.email,
            &request.username,
            &request.image,
            request.allow_push,
            request.daily_target,
            request.provider,
        );
        let user = self.user_repository.save(user).await?;
        Ok(user.into())
    }

    pub async fn update_user_by_id(
        &self,
        id: &str,
        authentication: &JwtAuthentication,
        request: UpdateUserByIdRequest,
    ) -> AppResult<UserResponse> {
        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if authentication.id != user.id && !authentication.is_admin() {
            return Err(AppError::PermissionDenied);
        }

        user.username = request.username;
        user.image = request.image;
        user.allow_push = request.allow_push;
        user.daily_target = request.daily_target;

        let user = self.user_repository.save(user).await?;
        Ok(user.into())
    }

    pub async fn delete_user_by_id(
        &self,
        id: &str,
        authentication: &JwtAuthentication,
    ) -> AppResult<()> {
        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if authentication.id != user.id && !authentication.is_admin() {
            return Err(AppError::PermissionDenied);
        }

        self.delete_user(&user).await
    }

    /// Used by the OAuth2 revocation flow, which identifies the account by
    /// (email, provider) rather than by id.
    pub async fn delete_user_by_email_and_provider(
        &self,
        email: &str,
        provider: Provider,
    ) -> AppResult<()> {
        let user = self
            .user_repository
            .find_by_email_and_provider(email, provider)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.delete_user(&user).await
    }

    /// Deletes the account, its refresh token, and every trace of the user
    /// id in quiz vote/bookmark sets. Whole-collection rewrite, no rollback
    /// if a later write fails.
    async fn delete_user(&self, user: &User) -> AppResult<()> {
        self.user_repository.delete_by_id(&user.id).await?;
        self.token_repository.delete_by_user_id(&user.id).await?;

        let quizzes = self.quiz_repository.find_all().await?;
        let affected: Vec<_> = quizzes
            .into_iter()
            .filter(|quiz| {
                quiz.marked_user_ids.contains(&user.id)
                    || quiz.liked_user_ids.contains(&user.id)
                    || quiz.unliked_user_ids.contains(&user.id)
            })
            .map(|mut quiz| {
                quiz.marked_user_ids.remove(&user.id);
                quiz.liked_user_ids.remove(&user.id);
                quiz.unliked_user_ids.remove(&user.id);
                quiz
            })
            .collect();

        self.quiz_repository.save_all(affected).await?;
        Ok(())
    }
}
