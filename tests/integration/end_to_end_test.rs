//! End-to-end planning over small on-disk projects

use std::path::Path;

use guardsmith::{
    core::GuardSession,
    models::{plan::GuardFilePlan, DiagnosticKind, GuardName, GuardPlan},
};
use tempfile::tempdir;

use super::support::{create_shop_project, settings_for, write_file};

fn file_for<'a>(plan: &'a GuardPlan, root: &Path, source: &str) -> &'a GuardFilePlan {
    let source = root.join(source);
    plan.files
        .iter()
        .find(|file| file.source == source)
        .unwrap_or_else(|| panic!("no guard file planned for {}", source.display()))
}

fn alias<'a>(file: &'a GuardFilePlan, root: &Path, module: &str, key: &str) -> Option<&'a str> {
    file.dependencies
        .get(&root.join(module))
        .and_then(|aliases| aliases.get(key))
        .map(String::as_str)
}

#[test]
fn test_annotated_declarations_are_planned() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    assert_eq!(plan.modules_scanned, 4);
    assert_eq!(plan.files.len(), 2);
    assert!(plan.failed.is_empty());
    assert!(plan.skipped.is_empty());
    assert!(plan.diagnostics.is_empty(), "unexpected diagnostics: {:?}", plan.diagnostics);

    let user = file_for(&plan, root, "src/models/user.ts");
    assert_eq!(user.output, root.join("src/models/user.guard.ts"));
    assert_eq!(user.guards.len(), 1);
    assert_eq!(user.guards[0].function_name, "isUser");
    assert_eq!(user.guards[0].name, GuardName::Custom("isUser".into()));
    assert_eq!(alias(user, root, "src/models/role.ts", "Role"), Some("Role"));

    let order = file_for(&plan, root, "src/orders.ts");
    assert_eq!(order.output, root.join("src/orders.guard.ts"));
    assert_eq!(order.guards[0].declaration, "Order");
    assert_eq!(alias(order, root, "src/models/user.ts", "User"), Some("User"));
    // Re-exported under another name, imported from where it is declared
    assert_eq!(alias(order, root, "src/models/role.ts", "Role"), Some("Role"));
    assert_eq!(order.named_imports.get("UserRole").map(String::as_str), Some("./models/index.js"));
    assert!(order.dependencies.keys().all(|module| module.starts_with(root)));
}

#[test]
fn test_export_all_derives_names() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);

    let mut settings = settings_for(root);
    settings.process.export_all = true;
    let plan = GuardSession::new(settings).run().unwrap();

    let role = file_for(&plan, root, "src/models/role.ts");
    assert_eq!(role.guards[0].name, GuardName::Derived("isRole".into()));

    let orders = file_for(&plan, root, "src/orders.ts");
    let names: Vec<&str> = orders.guards.iter().map(|g| g.function_name.as_str()).collect();
    assert_eq!(names, vec!["isOrder", "isOrderId"]);
    assert_eq!(orders.guards[0].name, GuardName::Custom("isOrder".into()));

    // Annotation still wins over the derived name
    let user = file_for(&plan, root, "src/models/user.ts");
    assert_eq!(user.guards[0].name, GuardName::Custom("isUser".into()));
}

#[test]
fn test_explicit_paths_restrict_processing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);

    let mut settings = settings_for(root);
    settings.paths = vec!["src/models/*.ts".to_string()];
    let plan = GuardSession::new(settings).run().unwrap();

    assert_eq!(plan.modules_scanned, 3);
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].source, root.join("src/models/user.ts"));
}

#[test]
fn test_parallel_and_sequential_plans_match() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);
    for i in 0..12 {
        write_file(
            root,
            &format!("src/generated/model{}.ts", i),
            &format!(
                "import {{ User }} from \"../models/user\";\n\nexport interface Model{i} {{\n    owner: User;\n    index: number;\n}}\n",
                i = i
            ),
        );
    }

    let mut sequential = settings_for(root);
    sequential.process.export_all = true;
    let mut parallel = sequential.clone();
    parallel.parallel = true;

    let first = GuardSession::new(sequential).run().unwrap();
    let second = GuardSession::new(parallel).run().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.modules_scanned, 16);
}

#[test]
fn test_unsupported_directive_is_reported() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(
        root,
        "src/point.ts",
        "/** @see {isPoint} ts-auto-guard:serializer */\nexport interface Point { x: number; y: number }\n",
    );

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    assert!(plan.files.is_empty());
    assert_eq!(plan.diagnostics.len(), 1);
    assert_eq!(plan.diagnostics[0].kind, DiagnosticKind::UnsupportedDirective);
    assert!(!plan.has_failures());
}

#[test]
fn test_default_exports_resolve_through_default_imports() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/team.ts", "export default interface Team { name: string }\n");
    write_file(
        root,
        "src/member.ts",
        r#"import Team from "./team";

/** @see {isMember} ts-auto-guard:type-guard */
export interface Member {
    team: Team;
}
"#,
    );

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    let member = file_for(&plan, root, "src/member.ts");
    assert_eq!(alias(member, root, "src/team.ts", "default"), Some("Team"));
}

#[test]
fn test_broken_sources_do_not_stop_the_run() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);
    write_file(root, "src/broken.ts", "export interface Broken {\n");

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].path, root.join("src/broken.ts"));
    assert_eq!(plan.files.len(), 2);
}

#[test]
fn test_enum_member_types_import_their_enum() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/role.ts", "export enum Role { Admin, Guest }\n");
    write_file(
        root,
        "src/admin.ts",
        r#"import { Role } from "./role";

/** @see ts-auto-guard:type-guard */
export interface Admin {
    kind: Role.Admin;
    name: string;
}
"#,
    );

    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    let admin = file_for(&plan, root, "src/admin.ts");
    assert_eq!(admin.guards[0].function_name, "isAdmin");
    assert_eq!(admin.dependencies.len(), 1);
    assert_eq!(alias(admin, root, "src/role.ts", "Role"), Some("Role"));
    assert!(plan.diagnostics.is_empty());
}
