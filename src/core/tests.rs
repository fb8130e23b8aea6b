#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    use tokio::sync::Notify;

    use crate::core::{
        AppRoute, AuthBackend, AuthError, BackendProfile, GuardDecision, Identity,
        IdentityProvider, MemoryStorage, PostAuthRedirect, RegistrationForm, Role, RouteAccess,
        SESSION_STORAGE_KEY, SessionState, SessionStore, SessionView, StorageBackend,
        StorageError, decide_route, landing_route,
    };

    /// In-memory stand-in for the authentication backend
    #[derive(Default)]
    struct ScriptedBackend {
        accounts: Vec<(String, String, BackendProfile)>,
        unavailable: bool,
        gate: Option<Arc<Notify>>,
        login_calls: AtomicUsize,
        register_calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            let mut backend = Self::default();
            backend.add("collector@example.com", "x", "collector", None);
            backend.add("staff@example.com", "x", "staff", Some("roads"));
            backend.add("head@example.com", "x", "department_head", Some("roads"));
            backend.add("citizen@example.com", "x", "public", None);
            backend
        }

        fn add(&mut self, email: &str, password: &str, role: &str, department: Option<&str>) {
            let profile = BackendProfile {
                id: Some(format!("id-{}", self.accounts.len() + 1)),
                email: email.to_string(),
                name: None,
                role: role.to_string(),
                phone_number: None,
                department_id: department.map(str::to_string),
            };
            self.accounts
                .push((email.to_string(), password.to_string(), profile));
        }

        fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::new()
            }
        }

        /// Hold every call until the gate is notified
        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new()
            }
        }

        async fn wait_for_gate(&self) {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }
    }

    impl AuthBackend for ScriptedBackend {
        async fn authenticate(
            &self,
            email: &str,
            password: &str,
        ) -> Result<BackendProfile, AuthError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;

            if self.unavailable {
                return Err(AuthError::BackendUnavailable("connection refused".to_string()));
            }

            self.accounts
                .iter()
                .find(|(e, p, _)| e == email && p == password)
                .map(|(_, _, profile)| profile.clone())
                .ok_or(AuthError::InvalidCredentials)
        }

        async fn create_account(
            &self,
            form: &RegistrationForm,
        ) -> Result<BackendProfile, AuthError> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;

            if self.unavailable {
                return Err(AuthError::BackendUnavailable("connection refused".to_string()));
            }
            if self.accounts.iter().any(|(e, _, _)| e == &form.email) {
                return Err(AuthError::validation("email", "Email is already registered"));
            }

            Ok(BackendProfile {
                id: None,
                email: form.email.clone(),
                name: None,
                role: form.role.as_backend().to_string(),
                phone_number: None,
                department_id: None,
            })
        }
    }

    fn ready(
        backend: ScriptedBackend,
    ) -> (IdentityProvider<ScriptedBackend, MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let provider = IdentityProvider::new(backend, storage.clone());
        provider.initialize();
        (provider, storage)
    }

    fn staff_form() -> RegistrationForm {
        let mut form = RegistrationForm::new(Role::Staff);
        form.email = "new.staff@example.com".to_string();
        form.password = "longpassword".to_string();
        form.confirm_password = "longpassword".to_string();
        form.name = Some("New Staff".to_string());
        form.phone_number = Some("5551234567".to_string());
        form.department_id = Some("water".to_string());
        form
    }

    #[tokio::test]
    async fn test_collector_happy_path() {
        let (provider, _) = ready(ScriptedBackend::new());

        let identity = provider.login("collector@example.com", "x").await.unwrap();
        assert_eq!(identity.role, Role::Collector);

        let state = provider.view().state();
        assert_eq!(
            decide_route(AppRoute::CollectorDashboard, &state),
            GuardDecision::Render
        );
        assert_eq!(
            decide_route(AppRoute::StaffDashboard, &state),
            GuardDecision::Redirect(AppRoute::CollectorDashboard)
        );
        assert_eq!(landing_route(state.identity()), AppRoute::CollectorDashboard);
    }

    #[tokio::test]
    async fn test_staff_is_corrected_to_own_dashboard() {
        let (provider, _) = ready(ScriptedBackend::new());
        provider.login("staff@example.com", "x").await.unwrap();

        let state = provider.state();
        assert_eq!(
            decide_route(AppRoute::ReportTriage, &state),
            GuardDecision::Redirect(AppRoute::StaffDashboard)
        );
        assert_eq!(decide_route(AppRoute::TaskBoard, &state), GuardDecision::Render);
    }

    #[test]
    fn test_anonymous_is_denied_everywhere() {
        let (provider, _) = ready(ScriptedBackend::new());
        let state = provider.state();
        assert_eq!(state, SessionState::Anonymous);

        for route in AppRoute::ALL {
            let decision = decide_route(route, &state);
            if route.access() == RouteAccess::Public {
                assert_eq!(decision, GuardDecision::Render);
            } else {
                assert_eq!(decision, GuardDecision::Redirect(AppRoute::Login), "{route}");
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_credentials_leave_state_untouched() {
        let (provider, storage) = ready(ScriptedBackend::new());

        let result = provider.login("collector@example.com", "wrong").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));

        let result = provider.login("nobody@example.com", "x").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));

        assert_eq!(provider.state(), SessionState::Anonymous);
        assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
        assert!(!provider.is_busy());
    }

    #[tokio::test]
    async fn test_backend_unavailable_is_retryable() {
        let (provider, _) = ready(ScriptedBackend::unavailable());

        let err = provider
            .login("collector@example.com", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BackendUnavailable(_)));
        assert!(err.is_retryable());
        assert_eq!(provider.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_registration_field_gating_skips_backend() {
        let (provider, storage) = ready(ScriptedBackend::new());
        let mut form = staff_form();
        form.department_id = None;

        let result = provider.register(&form).await;
        assert_eq!(result.unwrap_err().field(), Some("department_id"));

        assert_eq!(provider.backend_register_calls(), 0);
        assert_eq!(provider.state(), SessionState::Anonymous);
        assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_persists_and_routes() {
        let (provider, storage) = ready(ScriptedBackend::new());

        let identity = provider.register(&staff_form()).await.unwrap();
        assert_eq!(identity.role, Role::Staff);
        assert_eq!(identity.name, "New Staff");
        assert_eq!(identity.department_id.as_deref(), Some("water"));
        assert_eq!(identity.phone_number.as_deref(), Some("5551234567"));
        assert!(!identity.id.is_empty());

        assert_eq!(SessionStore::new(storage).load(), Some(identity.clone()));
        assert_eq!(landing_route(Some(&identity)), AppRoute::StaffDashboard);
    }

    #[tokio::test]
    async fn test_register_backend_rejection_does_not_mutate() {
        let (provider, storage) = ready(ScriptedBackend::new());
        let mut form = staff_form();
        form.email = "staff@example.com".to_string();

        let result = provider.register(&form).await;
        assert_eq!(result.unwrap_err().field(), Some("email"));
        assert_eq!(provider.backend_register_calls(), 1);
        assert_eq!(provider.state(), SessionState::Anonymous);
        assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let (provider, storage) = ready(ScriptedBackend::new());
        provider.login("head@example.com", "x").await.unwrap();
        assert!(storage.get(SESSION_STORAGE_KEY).unwrap().is_some());

        for _ in 0..2 {
            provider.logout().unwrap();
            assert_eq!(provider.state(), SessionState::Anonymous);
            assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let storage = MemoryStorage::new();
        {
            let provider = IdentityProvider::new(ScriptedBackend::new(), storage.clone());
            provider.initialize();
            provider.login("citizen@example.com", "x").await.unwrap();
        }

        let provider = IdentityProvider::new(ScriptedBackend::new(), storage);
        let state = provider.initialize();
        assert_eq!(state.identity().map(|i| i.role), Some(Role::Public));
        assert_eq!(landing_route(state.identity()), AppRoute::ReportIssue);
    }

    #[test]
    fn test_corrupt_session_starts_anonymous() {
        let storage = MemoryStorage::new();
        storage
            .set(SESSION_STORAGE_KEY, "\u{0}\u{1}garbage")
            .unwrap();

        let provider = IdentityProvider::new(ScriptedBackend::new(), storage.clone());
        assert_eq!(provider.initialize(), SessionState::Anonymous);
        assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_login_is_rejected() {
        let gate = Arc::new(Notify::new());
        let (provider, storage) = ready(ScriptedBackend::gated(Arc::clone(&gate)));

        let (first, second, logout) = tokio::join!(
            provider.login("collector@example.com", "x"),
            provider.login("staff@example.com", "x"),
            async {
                let result = provider.logout();
                gate.notify_one();
                result
            },
        );

        assert_eq!(first.unwrap().role, Role::Collector);
        assert_eq!(second, Err(AuthError::ConcurrentAuthOperation));
        assert_eq!(logout, Err(AuthError::ConcurrentAuthOperation));
        assert_eq!(provider.backend_login_calls(), 1);

        let stored = SessionStore::new(storage).load().unwrap();
        assert_eq!(stored.email, "collector@example.com");
        assert!(!provider.is_busy());
    }

    #[tokio::test]
    async fn test_login_during_registration_is_rejected() {
        let gate = Arc::new(Notify::new());
        let (provider, storage) = ready(ScriptedBackend::gated(Arc::clone(&gate)));
        let form = staff_form();

        let (registered, login) = tokio::join!(provider.register(&form), async {
            let result = provider.login("collector@example.com", "x").await;
            gate.notify_one();
            result
        });

        assert_eq!(login, Err(AuthError::ConcurrentAuthOperation));
        assert_eq!(provider.backend_login_calls(), 0);
        assert_eq!(provider.backend_register_calls(), 1);

        let identity = registered.unwrap();
        assert_eq!(identity.email, "new.staff@example.com");
        assert_eq!(provider.current(), Some(identity.clone()));
        assert_eq!(SessionStore::new(storage).load(), Some(identity));
        assert!(!provider.is_busy());
    }

    #[tokio::test]
    async fn test_late_result_applies_without_forcing_navigation() {
        let gate = Arc::new(Notify::new());
        let (provider, _) = ready(ScriptedBackend::gated(Arc::clone(&gate)));
        let redirect = PostAuthRedirect::from_path("/login");
        let mut current_path = "/login";
        assert_eq!(redirect.origin(), current_path);

        let (identity, ()) = tokio::join!(provider.login("staff@example.com", "x"), async {
            // The user clicks away while the request is pending.
            current_path = "/";
            gate.notify_one();
        });

        let identity = identity.unwrap();
        assert!(provider.state().is_authenticated());
        assert_eq!(redirect.destination(current_path, &identity), None);
        assert_eq!(
            redirect.destination("/login", &identity),
            Some(AppRoute::StaffDashboard)
        );
    }

    /// Storage that records whether the session was published before it
    /// was written
    struct ObservingStorage {
        inner: MemoryStorage,
        view: Arc<OnceLock<SessionView>>,
        published_early: Arc<AtomicBool>,
    }

    impl StorageBackend for ObservingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if let Some(view) = self.view.get()
                && view.state().is_authenticated()
            {
                self.published_early.store(true, Ordering::SeqCst);
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn test_session_is_written_before_it_is_published() {
        let view = Arc::new(OnceLock::new());
        let published_early = Arc::new(AtomicBool::new(false));
        let storage = ObservingStorage {
            inner: MemoryStorage::new(),
            view: Arc::clone(&view),
            published_early: Arc::clone(&published_early),
        };

        let provider = IdentityProvider::new(ScriptedBackend::new(), storage);
        let _ = view.set(provider.view());
        provider.initialize();

        provider.login("collector@example.com", "x").await.unwrap();
        assert!(provider.state().is_authenticated());
        assert!(!published_early.load(Ordering::SeqCst));
    }

    #[test]
    fn test_role_router_is_total() {
        let public_entry = landing_route(None);
        assert_eq!(public_entry, AppRoute::Login);

        for role in Role::ALL {
            let identity = Identity::new(None, "a@example.com", None, role, None, None);
            let route = landing_route(Some(&identity));
            assert_ne!(route, public_entry);
            assert_eq!(
                decide_route(route, &SessionState::Authenticated(identity)),
                GuardDecision::Render
            );
        }
    }

    impl IdentityProvider<ScriptedBackend, MemoryStorage> {
        fn backend_login_calls(&self) -> usize {
            self.backend().login_calls.load(Ordering::SeqCst)
        }

        fn backend_register_calls(&self) -> usize {
            self.backend().register_calls.load(Ordering::SeqCst)
        }
    }
}
