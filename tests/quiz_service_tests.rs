mod common;

use std::sync::Arc;

use quizit_server::{
    auth::JwtAuthentication,
    errors::AppError,
    models::dto::request::{CheckAnswerRequest, CreateQuizRequest, UpdateQuizByIdRequest},
    repositories::{QuizRepository, UserRepository},
    services::QuizService,
};

use common::{
    test_chapter, test_course, test_quiz, test_user, InMemoryChapterRepository,
    InMemoryCourseRepository, InMemoryQuizRepository, InMemoryUserRepository,
};

struct Fixture {
    quiz_repository: Arc<InMemoryQuizRepository>,
    chapter_repository: Arc<InMemoryChapterRepository>,
    course_repository: Arc<InMemoryCourseRepository>,
    user_repository: Arc<InMemoryUserRepository>,
    service: QuizService,
}

fn fixture() -> Fixture {
    let quiz_repository = Arc::new(InMemoryQuizRepository::new());
    let chapter_repository = Arc::new(InMemoryChapterRepository::new());
    let course_repository = Arc::new(InMemoryCourseRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());

    let service = QuizService::new(
        quiz_repository.clone(),
        chapter_repository.clone(),
        course_repository.clone(),
        user_repository.clone(),
    );

    Fixture {
        quiz_repository,
        chapter_repository,
        course_repository,
        user_repository,
        service,
    }
}

fn user_auth(id: &str) -> JwtAuthentication {
    JwtAuthentication::new(id, vec!["USER".to_string()])
}

#[tokio::test]
async fn check_answer_correct_updates_both_sides() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;
    f.user_repository.insert(test_user("user-1")).await;

    let response = f
        .service
        .check_answer("quiz-1", "user-1", CheckAnswerRequest { answer: 1 })
        .await
        .unwrap();

    assert_eq!(response.answer, 1);
    assert_eq!(response.solution, "solution");

    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert_eq!(quiz.correct_count, 1);
    assert_eq!(quiz.answer_rate, 100.0);

    let user = f.user_repository.find_by_id("user-1").await.unwrap().unwrap();
    assert!(user.correct_quiz_ids.contains("quiz-1"));
    assert!(user.incorrect_quiz_ids.is_empty());
    assert_eq!(user.answer_rate, 100.0);
}

#[tokio::test]
async fn check_answer_wrong_then_correct_moves_quiz_between_sets() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;
    f.user_repository.insert(test_user("user-1")).await;

    let response = f
        .service
        .check_answer("quiz-1", "user-1", CheckAnswerRequest { answer: 0 })
        .await
        .unwrap();
    // The answer is revealed even on a wrong submission.
    assert_eq!(response.answer, 1);

    let user = f.user_repository.find_by_id("user-1").await.unwrap().unwrap();
    assert!(user.incorrect_quiz_ids.contains("quiz-1"));

    f.service
        .check_answer("quiz-1", "user-1", CheckAnswerRequest { answer: 1 })
        .await
        .unwrap();

    let user = f.user_repository.find_by_id("user-1").await.unwrap().unwrap();
    assert!(user.correct_quiz_ids.contains("quiz-1"));
    assert!(!user.incorrect_quiz_ids.contains("quiz-1"));
    assert_eq!(user.answer_rate, 100.0);

    // The quiz counters track submissions, not users.
    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert_eq!(quiz.correct_count, 1);
    assert_eq!(quiz.incorrect_count, 1);
    assert_eq!(quiz.answer_rate, 50.0);
}

#[tokio::test]
async fn check_answer_requires_quiz_and_user() {
    let f = fixture();
    f.user_repository.insert(test_user("user-1")).await;

    let missing_quiz = f
        .service
        .check_answer("missing", "user-1", CheckAnswerRequest { answer: 1 })
        .await;
    assert!(matches!(missing_quiz, Err(AppError::QuizNotFound)));

    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;
    let missing_user = f
        .service
        .check_answer("quiz-1", "missing", CheckAnswerRequest { answer: 1 })
        .await;
    assert!(matches!(missing_user, Err(AppError::UserNotFound)));
}

#[tokio::test]
async fn mark_quiz_toggles_on_both_quiz_and_user() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;
    f.user_repository.insert(test_user("user-1")).await;

    f.service.mark_quiz("quiz-1", "user-1").await.unwrap();

    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    let user = f.user_repository.find_by_id("user-1").await.unwrap().unwrap();
    assert!(quiz.marked_user_ids.contains("user-1"));
    assert!(user.marked_quiz_ids.contains("quiz-1"));

    f.service.mark_quiz("quiz-1", "user-1").await.unwrap();

    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    let user = f.user_repository.find_by_id("user-1").await.unwrap().unwrap();
    assert!(!quiz.marked_user_ids.contains("user-1"));
    assert!(!user.marked_quiz_ids.contains("quiz-1"));
}

#[tokio::test]
async fn evaluate_is_an_exclusive_toggle() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;

    // Like, then switch to unlike, then retract.
    f.service.evaluate_quiz("quiz-1", "user-1", true).await.unwrap();
    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert!(quiz.liked_user_ids.contains("user-1"));
    assert!(!quiz.unliked_user_ids.contains("user-1"));

    f.service.evaluate_quiz("quiz-1", "user-1", false).await.unwrap();
    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert!(!quiz.liked_user_ids.contains("user-1"));
    assert!(quiz.unliked_user_ids.contains("user-1"));

    f.service.evaluate_quiz("quiz-1", "user-1", false).await.unwrap();
    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert!(!quiz.liked_user_ids.contains("user-1"));
    assert!(!quiz.unliked_user_ids.contains("user-1"));
}

#[tokio::test]
async fn create_quiz_snapshots_course_chain() {
    let f = fixture();
    f.course_repository.insert(test_course("course-9", "curriculum-9")).await;
    f.chapter_repository.insert(test_chapter("chapter-9", "course-9", 0)).await;

    let quiz = f
        .service
        .create_quiz(
            "writer-1",
            CreateQuizRequest {
                question: "new question".to_string(),
                answer: 2,
                solution: "because".to_string(),
                chapter_id: "chapter-9".to_string(),
                options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(quiz.chapter_id, "chapter-9");
    assert_eq!(quiz.course_id, "course-9");
    assert_eq!(quiz.curriculum_id, "curriculum-9");
    assert_eq!(quiz.answer_rate, 0.0);
    assert_eq!(quiz.writer_id, "writer-1");
}

#[tokio::test]
async fn create_quiz_fails_without_chapter_or_course() {
    let f = fixture();

    let request = CreateQuizRequest {
        question: "q".to_string(),
        answer: 0,
        solution: "s".to_string(),
        chapter_id: "chapter-9".to_string(),
        options: vec!["a".to_string(), "b".to_string()],
    };

    let result = f.service.create_quiz("writer-1", request.clone()).await;
    assert!(matches!(result, Err(AppError::ChapterNotFound)));

    // A chapter pointing at a vanished course is also an error.
    f.chapter_repository.insert(test_chapter("chapter-9", "course-9", 0)).await;
    let result = f.service.create_quiz("writer-1", request).await;
    assert!(matches!(result, Err(AppError::CourseNotFound)));
}

#[tokio::test]
async fn delete_quiz_cascades_into_user_sets() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;

    let mut solver = test_user("solver");
    solver.correct_answer("quiz-1");
    solver.mark_quiz("quiz-1");
    f.user_repository.insert(solver).await;

    let mut bystander = test_user("bystander");
    bystander.correct_answer("other-quiz");
    f.user_repository.insert(bystander).await;

    f.service
        .delete_quiz_by_id("quiz-1", &user_auth("writer-1"))
        .await
        .unwrap();

    assert!(f.quiz_repository.find_by_id("quiz-1").await.unwrap().is_none());

    let solver = f.user_repository.find_by_id("solver").await.unwrap().unwrap();
    assert!(!solver.correct_quiz_ids.contains("quiz-1"));
    assert!(!solver.marked_quiz_ids.contains("quiz-1"));

    let bystander = f.user_repository.find_by_id("bystander").await.unwrap().unwrap();
    assert!(bystander.correct_quiz_ids.contains("other-quiz"));
}

#[tokio::test]
async fn delete_quiz_requires_writer_or_admin() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;

    let result = f
        .service
        .delete_quiz_by_id("quiz-1", &user_auth("someone-else"))
        .await;
    assert!(matches!(result, Err(AppError::PermissionDenied)));

    let admin = JwtAuthentication::new("admin-1", vec!["ADMIN".to_string()]);
    f.service.delete_quiz_by_id("quiz-1", &admin).await.unwrap();
    assert!(f.quiz_repository.find_by_id("quiz-1").await.unwrap().is_none());
}

#[tokio::test]
async fn update_quiz_replaces_content_fields() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;

    let updated = f
        .service
        .update_quiz_by_id(
            "quiz-1",
            &user_auth("writer-1"),
            UpdateQuizByIdRequest {
                question: "rewritten".to_string(),
                answer: 0,
                solution: "new solution".to_string(),
                options: vec!["x".to_string(), "y".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.question, "rewritten");
    assert_eq!(updated.options, vec!["x".to_string(), "y".to_string()]);

    let quiz = f.quiz_repository.find_by_id("quiz-1").await.unwrap().unwrap();
    assert_eq!(quiz.answer, 0);
    assert_eq!(quiz.solution, "new solution");
}

#[tokio::test]
async fn answer_rate_range_query_filters_and_paginates() {
    let f = fixture();

    for i in 0..5 {
        let mut quiz = test_quiz(&format!("quiz-{i}"), "writer-1", "chapter-1");
        quiz.correct_count = i;
        quiz.incorrect_count = 10 - i;
        quiz.answer_rate = i as f64 * 10.0;
        f.quiz_repository.insert(quiz).await;
    }

    let first_page = f
        .service
        .get_quizzes_by_chapter_id_and_answer_rate_range("chapter-1", 10.0, 40.0, 0, 2)
        .await
        .unwrap();
    assert_eq!(first_page.len(), 2);

    let second_page = f
        .service
        .get_quizzes_by_chapter_id_and_answer_rate_range("chapter-1", 10.0, 40.0, 1, 2)
        .await
        .unwrap();
    assert_eq!(second_page.len(), 2);
    assert_ne!(first_page[0].id, second_page[0].id);

    let out_of_range = f
        .service
        .get_quizzes_by_chapter_id_and_answer_rate_range("chapter-1", 90.0, 100.0, 0, 10)
        .await
        .unwrap();
    assert!(out_of_range.is_empty());
}

#[tokio::test]
async fn marked_quizzes_follow_the_user_bookmark_set() {
    let f = fixture();
    f.quiz_repository.insert(test_quiz("quiz-1", "writer-1", "chapter-1")).await;
    f.quiz_repository.insert(test_quiz("quiz-2", "writer-1", "chapter-1")).await;

    let mut user = test_user("user-1");
    user.mark_quiz("quiz-2");
    f.user_repository.insert(user).await;

    let marked = f.service.get_marked_quizzes("user-1").await.unwrap();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].id, "quiz-2");
}

#[tokio::test]
async fn question_search_is_case_insensitive_substring() {
    let f = fixture();
    let mut quiz = test_quiz("quiz-1", "writer-1", "chapter-1");
    quiz.question = "What Does HTTP Stand For?".to_string();
    f.quiz_repository.insert(quiz).await;

    let hits = f.service.get_quizzes_by_question_contains("http").await.unwrap();
    assert_eq!(hits.len(), 1);

    let misses = f.service.get_quizzes_by_question_contains("tcp").await.unwrap();
    assert!(misses.is_empty());
}
