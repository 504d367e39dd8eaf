use chrono::Utc;
use log::info;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::{AuthError, StorageBackend, StoreError, StoreState, User, UserProfile};
use crate::model::Resume;

/// The signed-in context handed to every controller.
///
/// Every mutation is applied to a copy of the state, persisted, and only then adopted, so a
/// failed operation leaves both the backend and the session untouched.
#[derive(Debug)]
pub struct Session<B> {
    backend: B,
    state: StoreState,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<B: StorageBackend> Session<B> {
    /// Opens a session over whatever `backend` currently holds.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let state = backend.load()?;
        Ok(Self { backend, state })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn commit(&mut self, next: StoreState) -> Result<(), AuthError> {
        self.backend.save(&next)?;
        self.state = next;
        Ok(())
    }

    fn current(&self) -> Option<&User> {
        let id = self.state.current_user.as_deref()?;
        self.state.users.iter().find(|user| user.id == id)
    }

    fn user_index(state: &StoreState, email: &str) -> Option<usize> {
        let email = normalize_email(email);
        state.users.iter().position(|user| user.email == email)
    }

    /// Creates an account and signs it in.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        if Self::user_index(&self.state, email).is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash: hash_password(password)?,
            image: None,
            created_at: now,
            last_login: Some(now),
            saved_resumes: Vec::new(),
        };
        let profile = UserProfile::from(&user);

        let mut next = self.state.clone();
        next.current_user = Some(user.id.clone());
        next.users.push(user);
        self.commit(next)?;

        info!("Signed up {}.", profile.email);
        Ok(profile)
    }

    /// Signs in with email and password. Nothing is written when the credentials are wrong.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let index = Self::user_index(&self.state, email).ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &self.state.users[index].password_hash)?;

        let mut next = self.state.clone();
        let user = &mut next.users[index];
        user.last_login = Some(Utc::now());
        let profile = UserProfile::from(&*user);
        next.current_user = Some(profile.id.clone());
        self.commit(next)?;

        info!("Logged in {}.", profile.email);
        Ok(profile)
    }

    /// Signs out. Signing out when nobody is signed in is a no-op.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if self.state.current_user.is_none() {
            return Ok(());
        }
        let mut next = self.state.clone();
        next.current_user = None;
        self.commit(next)?;
        info!("Logged out.");
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current().map(UserProfile::from)
    }

    /// Resumes of the signed-in user; empty when nobody is signed in.
    pub fn saved_resumes(&self) -> &[Resume] {
        self.current()
            .map(|user| user.saved_resumes.as_slice())
            .unwrap_or_default()
    }

    pub fn find_resume(&self, id: &str) -> Option<&Resume> {
        self.saved_resumes().iter().find(|resume| resume.id == id)
    }

    fn with_current_user<T>(
        &mut self,
        apply: impl FnOnce(&mut User) -> Result<T, AuthError>,
    ) -> Result<T, AuthError> {
        let id = self
            .state
            .current_user
            .clone()
            .ok_or(AuthError::NotAuthenticated)?;
        let mut next = self.state.clone();
        let user = next
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(AuthError::NotAuthenticated)?;
        let value = apply(user)?;
        self.commit(next)?;
        Ok(value)
    }

    /// Sets or clears the signed-in user's profile picture (a data URI or file path).
    pub fn update_user_image(&mut self, image: Option<String>) -> Result<UserProfile, AuthError> {
        let profile = self.with_current_user(|user| {
            user.image = image;
            Ok(UserProfile::from(&*user))
        })?;
        info!("Updated profile picture for {}.", profile.email);
        Ok(profile)
    }

    /// Stores `resume` as given, replacing any saved resume with the same id.
    pub fn save_resume(&mut self, resume: Resume) -> Result<(), AuthError> {
        let id = resume.id.clone();
        self.with_current_user(|user| {
            match user.saved_resumes.iter_mut().find(|saved| saved.id == resume.id) {
                Some(saved) => *saved = resume,
                None => user.saved_resumes.push(resume),
            }
            Ok(())
        })?;
        info!("Saved resume {id}.");
        Ok(())
    }

    /// Removes a saved resume from the persisted store.
    pub fn delete_resume(&mut self, id: &str) -> Result<Resume, AuthError> {
        let removed = self.with_current_user(|user| {
            let index = user
                .saved_resumes
                .iter()
                .position(|resume| resume.id == id)
                .ok_or_else(|| AuthError::ResumeNotFound(id.to_string()))?;
            Ok(user.saved_resumes.remove(index))
        })?;
        info!("Deleted resume {id}.");
        Ok(removed)
    }
}
