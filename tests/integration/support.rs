//! Shared project scaffolding for the integration tests

use std::fs;
use std::path::Path;

use guardsmith::models::config::Settings;

/// Write `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Sequential settings rooted at `root`
pub fn settings_for(root: &Path) -> Settings {
    Settings {
        project_path: root.to_path_buf(),
        parallel: false,
        show_progress: false,
        ..Settings::default()
    }
}

/// A small project: a role enum, an annotated user, an order using both and
/// a barrel module that re-exports the models
pub fn create_shop_project(root: &Path) {
    write_file(
        root,
        "src/models/role.ts",
        r#"export enum Role {
    Admin = "admin",
    Customer = "customer",
}
"#,
    );
    write_file(
        root,
        "src/models/user.ts",
        r#"import { Role } from "./role.js";

/** @see {isUser} ts-auto-guard:type-guard */
export interface User {
    id: string;
    role: Role;
    tags: readonly string[];
}
"#,
    );
    write_file(
        root,
        "src/models/index.ts",
        r#"export * from "./user";
export { Role as UserRole } from "./role";
"#,
    );
    write_file(
        root,
        "src/orders.ts",
        r#"import { User, UserRole } from "./models/index.js";

/**
 * An order placed by a user.
 * @see {isOrder} ts-auto-guard:type-guard
 */
export interface Order {
    id: number;
    buyer: User;
    approvedBy?: UserRole;
    placedAt: Date;
}

export type OrderId = number;
"#,
    );
    write_file(
        root,
        "node_modules/lib/index.ts",
        "/** @see {isIgnored} ts-auto-guard:type-guard */\nexport interface Ignored { x: number }\n",
    );
}
