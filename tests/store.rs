use std::fs;

use resume_pdf::model::{ImageSource, ResumeContent};
use resume_pdf::store::{
    AuthError, AuthResponse, JsonFileStorage, Session, StorageBackend, StoreError,
};
use resume_pdf::{DesignTemplate, Resume};

fn open(dir: &std::path::Path) -> Session<JsonFileStorage> {
    Session::open(JsonFileStorage::in_dir(dir)).expect("open store")
}

#[test]
fn saved_resumes_survive_reopening() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut content = ResumeContent::sample();
    content.add_custom_section();
    content.uploaded_image = Some(ImageSource::from_bytes([0x89, b'P', b'N', b'G'], "image/png"));
    let resume = Resume::with_id(
        "6f1c1f0e-4b8e-4c53-9b8f-1d2f8a7e0c11",
        content,
        DesignTemplate::CreativeVertical,
    );

    {
        let mut session = open(dir.path());
        session
            .signup("Jane Doe", "jane@x.com", "hunter2")
            .expect("signup");
        session.save_resume(resume.clone()).expect("save");
    }

    let session = open(dir.path());
    assert_eq!(
        session.current_user().map(|user| user.email),
        Some("jane@x.com".to_string())
    );
    assert_eq!(session.saved_resumes(), [resume]);
}

#[test]
fn deletion_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let resume = Resume::new(ResumeContent::sample(), DesignTemplate::Timeline);

    let mut session = open(dir.path());
    session.signup("Jane", "jane@x.com", "pw").expect("signup");
    session.save_resume(resume.clone()).expect("save");
    session.delete_resume(&resume.id).expect("delete");

    let reopened = open(dir.path());
    assert!(reopened.saved_resumes().is_empty());
    assert!(reopened.find_resume(&resume.id).is_none());
}

#[test]
fn failed_login_leaves_the_file_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(dir.path());
    session.signup("Jane", "jane@x.com", "right").expect("signup");
    let path = session.backend().path().to_path_buf();
    let before = fs::read(&path).expect("read store");

    let response = AuthResponse::from(session.login("nouser@x.com", "x"));
    assert_eq!(
        response,
        AuthResponse {
            success: false,
            user: None,
            error: Some("Invalid email or password".to_string()),
        }
    );
    assert!(matches!(
        session.login("jane@x.com", "wrong"),
        Err(AuthError::InvalidCredentials)
    ));

    assert_eq!(fs::read(&path).expect("read store"), before);
}

#[test]
fn signup_is_unique_across_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    open(dir.path())
        .signup("Jane", "jane@x.com", "pw")
        .expect("signup");

    let mut again = open(dir.path());
    let response = AuthResponse::from(again.signup("Jane", "Jane@X.com", "pw"));
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("User already exists"));

    let profile = again.login("jane@x.com", "pw").expect("login");
    assert_eq!(profile.name, "Jane");
}

#[test]
fn logout_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(dir.path());
    session.signup("Jane", "jane@x.com", "pw").expect("signup");
    session.logout().expect("logout");

    let reopened = open(dir.path());
    assert!(reopened.current_user().is_none());
    assert!(reopened.saved_resumes().is_empty());
}

#[test]
fn corrupt_store_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonFileStorage::in_dir(dir.path());
    fs::write(storage.path(), "{ not json").expect("write");

    assert!(matches!(storage.load(), Err(StoreError::Corrupt { .. })));
    assert!(Session::open(storage).is_err());
}

#[test]
fn store_file_uses_camel_case_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(dir.path());
    session.signup("Jane", "jane@x.com", "pw").expect("signup");
    session
        .save_resume(Resume::new(ResumeContent::sample(), DesignTemplate::Modern))
        .expect("save");

    let raw = fs::read_to_string(session.backend().path()).expect("read store");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let resume = &value["users"][0]["savedResumes"][0];
    assert_eq!(resume["designTemplate"], "modern");
    assert_eq!(resume["content"]["formData"]["fullName"], "John Doe");
    assert_eq!(resume["title"], "John Doe's Resume");
    assert!(value["users"][0]["password"].is_null());
    assert!(value["users"][0]["passwordHash"]
        .as_str()
        .is_some_and(|hash| hash.starts_with("$argon2")));
}

#[test]
fn profile_picture_survives_reopening() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut session = open(dir.path());
        session.signup("Jane", "jane@x.com", "pw").expect("signup");
        session
            .update_user_image(Some("/home/jane/me.png".into()))
            .expect("update image");
    }

    let session = open(dir.path());
    let profile = session.current_user().expect("still signed in");
    assert_eq!(profile.image.as_deref(), Some("/home/jane/me.png"));
}

#[test]
fn suggestion_applied_to_saved_resume_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut resume = Resume::new(ResumeContent::sample(), DesignTemplate::Modern);
    resume.resume_type = "student-resume".into();

    let suggestion = resume_pdf::suggestions::suggestions(&resume.resume_type, &resume.content)
        .into_iter()
        .find(|suggestion| suggestion.field == "skills.0")
        .expect("skills suggestion");
    resume
        .content
        .apply_suggestion(&suggestion.field, &suggestion.value)
        .expect("apply");
    resume.touch();

    let mut session = open(dir.path());
    session.signup("Jane", "jane@x.com", "pw").expect("signup");
    session.save_resume(resume.clone()).expect("save");

    let reopened = open(dir.path());
    let saved = reopened.find_resume(&resume.id).expect("saved");
    assert_eq!(saved.resume_type, "student-resume");
    let skills = &saved.content.section("skills").expect("skills").content;
    assert_eq!(skills[0], "Technical Skills:");
    assert!(skills[1].starts_with("\u{2022} Programming Languages"));
}
