//! Route guards and privilege checks through the public API

#[cfg(test)]
mod tests {
    use marketplace_client::auth::rbac::PermissionEvaluator;
    use marketplace_client::{ClientError, Guard, Identity, SessionContext, Separator, authorize};

    fn session(privileges: &[&str]) -> SessionContext {
        let session = SessionContext::new();
        session.set_identity(Identity {
            id: "1".to_string(),
            username: "ops".to_string(),
            email: None,
            privileges: privileges.iter().map(|p| p.to_string()).collect(),
        });
        session
    }

    #[test]
    fn test_documented_examples() {
        let none: [&str; 0] = [];
        assert!(authorize(&none, &none));
        assert!(authorize(&["USER_READ"], &["ALL_READ"]));
        assert!(authorize(&["USER_READ"], &["USER_MANAGE"]));
        assert!(authorize(&["USER_READ"], &["ALL_MANAGE"]));
        assert!(!authorize(&["USER_READ"], &["ORDER_READ"]));
        assert!(!authorize(&["USERREAD"], &["ALL_MANAGE"]));
        assert!(authorize(&["USERREAD"], &["USERREAD"]));
    }

    #[test]
    fn test_admin_routes() {
        let evaluator = PermissionEvaluator::default();
        let admin_users = Guard::any(["USER_READ", "USER_MANAGE"]);

        assert!(admin_users.check(&session(&["ALL_MANAGE"]), &evaluator).is_ok());
        assert!(admin_users.check(&session(&["USER_MANAGE"]), &evaluator).is_ok());
        assert!(admin_users.check(&session(&["ALL_READ"]), &evaluator).is_ok());

        let err = admin_users
            .check(&session(&["SHOP_MANAGE"]), &evaluator)
            .unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_signed_out_session() {
        let evaluator = PermissionEvaluator::default();
        let session = session(&["ALL_MANAGE"]);
        session.clear();

        let err = Guard::any(["ORDER_READ"]).check(&session, &evaluator).unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert!(Guard::public().check(&session, &evaluator).is_ok());
    }

    #[test]
    fn test_colon_separated_grants() {
        let evaluator = PermissionEvaluator::new(Separator::Colon);
        let guard = Guard::any(["product:update"]);
        assert!(guard.check(&session(&["product:MANAGE"]), &evaluator).is_ok());
        assert!(guard.check(&session(&["PRODUCT_MANAGE"]), &evaluator).is_err());
    }
}
