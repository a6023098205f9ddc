//! # Request Services
//!
//! Authorization and display-name resolution through the plugin facade.
//!
//! ## Properties Tested
//!
//! 1. **Creator short-circuit**: the creator is permitted with zero lookups,
//!    even when the directory is unreachable
//! 2. **Admin rule**: a non-creator is permitted iff they hold `system_admin`
//! 3. **No silent coercion**: lookup failures surface as errors
//! 4. **Naming policies**: mentions start with `@`, attributions never do

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pb_03_authorization::{AuthorizationModel, Decision};
    use pb_04_display_names::{creator_attribution_name, mention_name};
    use plugin_runtime::adapters::{HostCall, InMemoryHost};
    use plugin_runtime::{PluginConfig, PluginHost, PollPlugin};
    use proptest::prelude::*;
    use shared_types::{InMemoryUserDirectory, Poll, User, UserId};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn active_plugin() -> (PollPlugin, Arc<InMemoryHost>) {
        let host = Arc::new(InMemoryHost::new());
        host.add_user(User::new("U1", "alice").with_nickname("Ali"));
        host.add_user(User::new("U2", "root").with_roles("system_user system_admin"));
        host.add_user(User::new("U3", "bob").with_full_name("Bob", "Builder"));

        let plugin = PollPlugin::new(PluginConfig::default(), PluginHost::in_memory(&host))
            .expect("default config is valid");
        plugin.on_activate().expect("healthy host activates");
        host.clear_calls();
        (plugin, host)
    }

    fn poll_by(creator: &str) -> Poll {
        Poll::new("p1", creator, "Where do we eat?").with_options(vec!["Pizza", "Sushi"])
    }

    // =============================================================================
    // AUTHORIZATION
    // =============================================================================

    #[test]
    fn test_creator_permitted_without_lookup() {
        let (plugin, host) = active_plugin();
        let poll = poll_by("U1");

        assert!(plugin.has_permission(&poll, &UserId::new("U1")).unwrap());
        assert_eq!(host.call_count(HostCall::GetUser), 0);
        assert_eq!(host.users().lookup_count(), 0);
    }

    #[test]
    fn test_creator_permitted_when_directory_unreachable() {
        let (plugin, host) = active_plugin();
        host.fail_on(HostCall::GetUser);
        let poll = poll_by("U1");

        assert!(plugin.has_permission(&poll, &UserId::new("U1")).unwrap());
        assert!(plugin.has_permission(&poll, &UserId::new("U2")).is_err());
    }

    #[test]
    fn test_admin_and_member_decisions() {
        let (plugin, _host) = active_plugin();
        let poll = poll_by("U1");

        assert!(plugin.has_permission(&poll, &UserId::new("U2")).unwrap());
        assert!(!plugin.has_permission(&poll, &UserId::new("U3")).unwrap());
    }

    #[test]
    fn test_unknown_principal_is_error_not_denial() {
        let (plugin, _host) = active_plugin();
        let err = plugin
            .has_permission(&poll_by("U1"), &UserId::new("deleted"))
            .unwrap_err();
        assert_eq!(err.user_id, UserId::new("deleted"));
        assert_eq!(err.source.code, "not_found");
    }

    #[test]
    fn test_decision_names_the_rule() {
        let users = Arc::new(InMemoryUserDirectory::with_users([
            User::new("U2", "root").with_roles("system_admin"),
            User::new("U3", "bob"),
        ]));
        let model = AuthorizationModel::new(users);
        let poll = poll_by("U1");

        assert_eq!(
            model.decide(&poll, &UserId::new("U1")).unwrap(),
            Decision::Creator
        );
        assert_eq!(
            model.decide(&poll, &UserId::new("U2")).unwrap(),
            Decision::SystemAdmin
        );
        assert_eq!(
            model.decide(&poll, &UserId::new("U3")).unwrap(),
            Decision::Denied
        );
    }

    // =============================================================================
    // DISPLAY NAMES
    // =============================================================================

    #[test]
    fn test_mention_and_attribution() {
        let (plugin, _host) = active_plugin();

        let alice = UserId::new("U1");
        assert_eq!(plugin.convert_user_id_to_display_name(&alice).unwrap(), "@alice");
        assert_eq!(plugin.convert_creator_id_to_display_name(&alice).unwrap(), "Ali");

        let bob = UserId::new("U3");
        assert_eq!(
            plugin.convert_creator_id_to_display_name(&bob).unwrap(),
            "Bob Builder"
        );
    }

    #[test]
    fn test_deleted_account_fails_both_policies() {
        let (plugin, host) = active_plugin();
        host.users().remove(&UserId::new("U1"));

        assert!(plugin
            .convert_user_id_to_display_name(&UserId::new("U1"))
            .is_err());
        assert!(plugin
            .convert_creator_id_to_display_name(&UserId::new("U1"))
            .is_err());
    }

    #[test]
    fn test_services_work_without_activation() {
        let host = Arc::new(InMemoryHost::new());
        host.add_user(User::new("U1", "alice"));
        let plugin = PollPlugin::new(PluginConfig::default(), PluginHost::in_memory(&host)).unwrap();

        assert!(!plugin.is_activated());
        assert_eq!(
            plugin
                .convert_user_id_to_display_name(&UserId::new("U1"))
                .unwrap(),
            "@alice"
        );
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    fn name_part() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "@?[a-zA-Z][a-zA-Z0-9 ._-]{0,12}"]
    }

    proptest! {
        #[test]
        fn prop_mention_starts_with_marker_and_attribution_never_does(
            username in "[a-z][a-z0-9._-]{0,15}",
            nickname in name_part(),
            first in name_part(),
            last in name_part(),
        ) {
            let user = User::new("U9", username.clone())
                .with_nickname(nickname)
                .with_full_name(first, last);
            let users = InMemoryUserDirectory::with_users([user]);
            let id = UserId::new("U9");

            let mention = mention_name(&users, &id).unwrap();
            prop_assert!(mention.starts_with('@'));
            prop_assert_eq!(&mention[1..], username.as_str());

            let attribution = creator_attribution_name(&users, &id).unwrap();
            prop_assert!(!attribution.starts_with('@'));
            prop_assert!(!attribution.is_empty());
        }

        #[test]
        fn prop_creator_always_permitted(creator in "[A-Za-z0-9]{1,26}") {
            let users = InMemoryUserDirectory::new();
            users.set_unreachable(true);
            let poll = poll_by(&creator);

            let permitted = pb_03_authorization::can_modify(&users, &poll, &UserId::new(creator.clone()));
            prop_assert_eq!(permitted, Ok(true));
            prop_assert_eq!(users.lookup_count(), 0);
        }
    }
}
