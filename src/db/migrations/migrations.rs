// 数据库迁移脚本定义

use super::Migration;

/// 获取所有迁移
pub fn get_all_migrations() -> Vec<Migration> {
    vec![
        create_teams_table(),
        create_users_table(),
        create_team_members_table(),
        create_dashboards_table(),
        create_dashboard_tabs_table(),
        create_dashboard_templates_table(),
        create_charts_table(),
        create_chart_placements_table(),
        create_chart_versions_table(),
        create_chat_agents_table(),
        create_agent_commands_table(),
        create_chat_sessions_table(),
        create_chat_messages_table(),
        create_notifications_table(),
        create_share_links_table(),
        add_indexes(),
    ]
}

/// 创建团队表
fn create_teams_table() -> Migration {
    Migration {
        version: "20250601_000001".to_string(),
        name: "create_teams_table".to_string(),
        description: "创建团队表".to_string(),
        up_sql: r#"
            CREATE TYPE team_status AS ENUM ('active', 'suspended', 'archived');

            CREATE TABLE teams (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE,
                description TEXT,
                status team_status NOT NULL DEFAULT 'active',
                settings JSONB NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_teams_status ON teams(status);
            CREATE INDEX idx_teams_slug ON teams(slug);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS teams;
            DROP TYPE IF EXISTS team_status;
        "#.to_string(),
        dependencies: vec![],
    }
}

/// 创建用户表
fn create_users_table() -> Migration {
    Migration {
        version: "20250601_000002".to_string(),
        name: "create_users_table".to_string(),
        description: "创建用户表".to_string(),
        up_sql: r#"
            CREATE TYPE user_status AS ENUM ('active', 'inactive', 'suspended');
            CREATE TYPE user_role AS ENUM ('admin', 'operator', 'viewer');

            CREATE TABLE users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                display_name VARCHAR(255) NOT NULL,
                role user_role NOT NULL DEFAULT 'viewer',
                status user_status NOT NULL DEFAULT 'active',
                preferences JSONB NOT NULL DEFAULT '{}',
                last_login_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_users_email ON users(email);
            CREATE INDEX idx_users_status ON users(status);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS users;
            DROP TYPE IF EXISTS user_status;
            DROP TYPE IF EXISTS user_role;
        "#.to_string(),
        dependencies: vec![],
    }
}

/// 创建团队成员表
fn create_team_members_table() -> Migration {
    Migration {
        version: "20250601_000003".to_string(),
        name: "create_team_members_table".to_string(),
        description: "创建团队成员关系表".to_string(),
        up_sql: r#"
            CREATE TYPE team_member_role AS ENUM ('owner', 'editor', 'viewer');

            CREATE TABLE team_members (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                role team_member_role NOT NULL DEFAULT 'viewer',
                joined_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT uq_team_members_team_user UNIQUE (team_id, user_id)
            );

            CREATE INDEX idx_team_members_team ON team_members(team_id);
            CREATE INDEX idx_team_members_user ON team_members(user_id);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS team_members;
            DROP TYPE IF EXISTS team_member_role;
        "#.to_string(),
        dependencies: vec!["20250601_000001".to_string(), "20250601_000002".to_string()],
    }
}

/// 创建看板表
///
/// dashboard_owner_check 保证每个看板的归属者是用户或团队二选一。
fn create_dashboards_table() -> Migration {
    Migration {
        version: "20250601_000004".to_string(),
        name: "create_dashboards_table".to_string(),
        description: "创建看板表".to_string(),
        up_sql: r#"
            CREATE TABLE dashboards (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                owner_user_id UUID REFERENCES users(id) ON DELETE CASCADE,
                owner_team_id UUID REFERENCES teams(id) ON DELETE CASCADE,
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(100) NOT NULL,
                description TEXT,
                layout JSONB NOT NULL DEFAULT '{}',
                is_default BOOLEAN NOT NULL DEFAULT FALSE,
                is_archived BOOLEAN NOT NULL DEFAULT FALSE,
                created_by UUID NOT NULL REFERENCES users(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT dashboard_owner_check CHECK (
                    (owner_user_id IS NULL) <> (owner_team_id IS NULL)
                ),
                CONSTRAINT uq_dashboards_owner_slug UNIQUE NULLS NOT DISTINCT (owner_user_id, owner_team_id, slug)
            );

            CREATE INDEX idx_dashboards_owner_user ON dashboards(owner_user_id);
            CREATE INDEX idx_dashboards_owner_team ON dashboards(owner_team_id);
            CREATE INDEX idx_dashboards_archived ON dashboards(is_archived);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS dashboards;
        "#.to_string(),
        dependencies: vec!["20250601_000001".to_string(), "20250601_000002".to_string()],
    }
}

/// 创建看板标签页表
fn create_dashboard_tabs_table() -> Migration {
    Migration {
        version: "20250601_000005".to_string(),
        name: "create_dashboard_tabs_table".to_string(),
        description: "创建看板标签页表".to_string(),
        up_sql: r#"
            CREATE TABLE dashboard_tabs (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                dashboard_id UUID NOT NULL REFERENCES dashboards(id) ON DELETE CASCADE,
                title VARCHAR(255) NOT NULL,
                position INTEGER NOT NULL DEFAULT 0,
                settings JSONB NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT uq_dashboard_tabs_position UNIQUE (dashboard_id, position)
            );

            CREATE INDEX idx_dashboard_tabs_dashboard ON dashboard_tabs(dashboard_id);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS dashboard_tabs;
        "#.to_string(),
        dependencies: vec!["20250601_000004".to_string()],
    }
}

/// 创建看板模板表
fn create_dashboard_templates_table() -> Migration {
    Migration {
        version: "20250601_000006".to_string(),
        name: "create_dashboard_templates_table".to_string(),
        description: "创建看板模板表".to_string(),
        up_sql: r#"
            CREATE TABLE dashboard_templates (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL UNIQUE,
                description TEXT,
                definition JSONB NOT NULL DEFAULT '{}',
                is_builtin BOOLEAN NOT NULL DEFAULT FALSE,
                created_by UUID REFERENCES users(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS dashboard_templates;
        "#.to_string(),
        dependencies: vec!["20250601_000002".to_string()],
    }
}

/// 创建图表表
fn create_charts_table() -> Migration {
    Migration {
        version: "20250601_000007".to_string(),
        name: "create_charts_table".to_string(),
        description: "创建图表表".to_string(),
        up_sql: r#"
            CREATE TYPE chart_kind AS ENUM ('line', 'bar', 'gauge', 'pie', 'table', 'stat');
            CREATE TYPE chart_source AS ENUM ('live_metric', 'optimization_result', 'static');

            CREATE TABLE charts (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                owner_user_id UUID REFERENCES users(id) ON DELETE CASCADE,
                owner_team_id UUID REFERENCES teams(id) ON DELETE CASCADE,
                title VARCHAR(255) NOT NULL,
                kind chart_kind NOT NULL,
                source chart_source NOT NULL DEFAULT 'live_metric',
                query JSONB NOT NULL DEFAULT '{}',
                config JSONB NOT NULL DEFAULT '{}',
                current_version INTEGER NOT NULL DEFAULT 1,
                created_by UUID NOT NULL REFERENCES users(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT chart_owner_check CHECK (
                    (owner_user_id IS NULL) <> (owner_team_id IS NULL)
                )
            );

            CREATE INDEX idx_charts_owner_user ON charts(owner_user_id);
            CREATE INDEX idx_charts_owner_team ON charts(owner_team_id);
            CREATE INDEX idx_charts_source ON charts(source);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS charts;
            DROP TYPE IF EXISTS chart_kind;
            DROP TYPE IF EXISTS chart_source;
        "#.to_string(),
        dependencies: vec!["20250601_000001".to_string(), "20250601_000002".to_string()],
    }
}

/// 创建图表布局表
fn create_chart_placements_table() -> Migration {
    Migration {
        version: "20250601_000008".to_string(),
        name: "create_chart_placements_table".to_string(),
        description: "创建图表在标签页上的布局表".to_string(),
        up_sql: r#"
            CREATE TABLE chart_placements (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                tab_id UUID NOT NULL REFERENCES dashboard_tabs(id) ON DELETE CASCADE,
                chart_id UUID NOT NULL REFERENCES charts(id) ON DELETE CASCADE,
                grid_x INTEGER NOT NULL DEFAULT 0,
                grid_y INTEGER NOT NULL DEFAULT 0,
                grid_w INTEGER NOT NULL DEFAULT 4,
                grid_h INTEGER NOT NULL DEFAULT 3,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT uq_chart_placements_tab_chart UNIQUE (tab_id, chart_id)
            );

            CREATE INDEX idx_chart_placements_tab ON chart_placements(tab_id);
            CREATE INDEX idx_chart_placements_chart ON chart_placements(chart_id);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS chart_placements;
        "#.to_string(),
        dependencies: vec!["20250601_000005".to_string(), "20250601_000007".to_string()],
    }
}

/// 创建图表版本表
fn create_chart_versions_table() -> Migration {
    Migration {
        version: "20250601_000009".to_string(),
        name: "create_chart_versions_table".to_string(),
        description: "创建图表配置版本快照表".to_string(),
        up_sql: r#"
            CREATE TABLE chart_versions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                chart_id UUID NOT NULL REFERENCES charts(id) ON DELETE CASCADE,
                version INTEGER NOT NULL,
                query JSONB NOT NULL DEFAULT '{}',
                config JSONB NOT NULL DEFAULT '{}',
                created_by UUID REFERENCES users(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT uq_chart_versions_chart_version UNIQUE (chart_id, version)
            );

            CREATE INDEX idx_chart_versions_chart ON chart_versions(chart_id);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS chart_versions;
        "#.to_string(),
        dependencies: vec!["20250601_000007".to_string()],
    }
}

/// 创建聊天 Agent 表
fn create_chat_agents_table() -> Migration {
    Migration {
        version: "20250601_000010".to_string(),
        name: "create_chat_agents_table".to_string(),
        description: "创建聊天 Agent 表".to_string(),
        up_sql: r#"
            CREATE TYPE chat_agent_status AS ENUM ('active', 'inactive');

            CREATE TABLE chat_agents (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL UNIQUE,
                description TEXT,
                status chat_agent_status NOT NULL DEFAULT 'active',
                capabilities JSONB NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS chat_agents;
            DROP TYPE IF EXISTS chat_agent_status;
        "#.to_string(),
        dependencies: vec![],
    }
}

/// 创建 Agent 命令表
fn create_agent_commands_table() -> Migration {
    Migration {
        version: "20250601_000011".to_string(),
        name: "create_agent_commands_table".to_string(),
        description: "创建 Agent 命令表".to_string(),
        up_sql: r#"
            CREATE TABLE agent_commands (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                agent_id UUID NOT NULL REFERENCES chat_agents(id) ON DELETE CASCADE,
                name VARCHAR(100) NOT NULL,
                description TEXT,
                argument_schema JSONB NOT NULL DEFAULT '{}',
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CONSTRAINT uq_agent_commands_agent_name UNIQUE (agent_id, name)
            );

            CREATE INDEX idx_agent_commands_agent ON agent_commands(agent_id);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS agent_commands;
        "#.to_string(),
        dependencies: vec!["20250601_000010".to_string()],
    }
}

/// 创建聊天会话表
fn create_chat_sessions_table() -> Migration {
    Migration {
        version: "20250601_000012".to_string(),
        name: "create_chat_sessions_table".to_string(),
        description: "创建聊天会话表".to_string(),
        up_sql: r#"
            CREATE TYPE chat_session_status AS ENUM ('active', 'closed');

            CREATE TABLE chat_sessions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                agent_id UUID REFERENCES chat_agents(id) ON DELETE SET NULL,
                title VARCHAR(255) NOT NULL DEFAULT '新会话',
                status chat_session_status NOT NULL DEFAULT 'active',
                context JSONB NOT NULL DEFAULT '{}',
                last_message_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_chat_sessions_user ON chat_sessions(user_id);
            CREATE INDEX idx_chat_sessions_status ON chat_sessions(status);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS chat_sessions;
            DROP TYPE IF EXISTS chat_session_status;
        "#.to_string(),
        dependencies: vec!["20250601_000002".to_string(), "20250601_000010".to_string()],
    }
}

/// 创建聊天消息表
fn create_chat_messages_table() -> Migration {
    Migration {
        version: "20250601_000013".to_string(),
        name: "create_chat_messages_table".to_string(),
        description: "创建聊天消息表".to_string(),
        up_sql: r#"
            CREATE TYPE chat_author AS ENUM ('user', 'agent', 'system');

            CREATE TABLE chat_messages (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                session_id UUID NOT NULL REFERENCES chat_sessions(id) ON DELETE CASCADE,
                author chat_author NOT NULL,
                content TEXT NOT NULL,
                payload JSONB NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_chat_messages_session ON chat_messages(session_id);
            CREATE INDEX idx_chat_messages_created ON chat_messages(created_at);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS chat_messages;
            DROP TYPE IF EXISTS chat_author;
        "#.to_string(),
        dependencies: vec!["20250601_000012".to_string()],
    }
}

/// 创建通知表
fn create_notifications_table() -> Migration {
    Migration {
        version: "20250601_000014".to_string(),
        name: "create_notifications_table".to_string(),
        description: "创建通知表".to_string(),
        up_sql: r#"
            CREATE TYPE notification_kind AS ENUM ('system', 'pressure_alert', 'optimization', 'sharing', 'chat');
            CREATE TYPE notification_severity AS ENUM ('info', 'warning', 'critical');

            CREATE TABLE notifications (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind notification_kind NOT NULL DEFAULT 'system',
                severity notification_severity NOT NULL DEFAULT 'info',
                title VARCHAR(255) NOT NULL,
                body TEXT NOT NULL DEFAULT '',
                payload JSONB NOT NULL DEFAULT '{}',
                read_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_notifications_user ON notifications(user_id);
            CREATE INDEX idx_notifications_unread ON notifications(user_id) WHERE read_at IS NULL;
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS notifications;
            DROP TYPE IF EXISTS notification_kind;
            DROP TYPE IF EXISTS notification_severity;
        "#.to_string(),
        dependencies: vec!["20250601_000002".to_string()],
    }
}

/// 创建分享链接表
fn create_share_links_table() -> Migration {
    Migration {
        version: "20250601_000015".to_string(),
        name: "create_share_links_table".to_string(),
        description: "创建看板分享链接表".to_string(),
        up_sql: r#"
            CREATE TYPE share_permission AS ENUM ('view', 'comment');

            CREATE TABLE share_links (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                dashboard_id UUID NOT NULL REFERENCES dashboards(id) ON DELETE CASCADE,
                token_hash VARCHAR(64) NOT NULL UNIQUE,
                permission share_permission NOT NULL DEFAULT 'view',
                created_by UUID NOT NULL REFERENCES users(id),
                expires_at TIMESTAMPTZ NOT NULL,
                revoked_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX idx_share_links_dashboard ON share_links(dashboard_id);
            CREATE INDEX idx_share_links_token ON share_links(token_hash);
        "#.to_string(),
        down_sql: r#"
            DROP TABLE IF EXISTS share_links;
            DROP TYPE IF EXISTS share_permission;
        "#.to_string(),
        dependencies: vec!["20250601_000004".to_string(), "20250601_000002".to_string()],
    }
}

/// 补充索引
fn add_indexes() -> Migration {
    Migration {
        version: "20250601_000016".to_string(),
        name: "add_indexes".to_string(),
        description: "补充查询性能索引".to_string(),
        up_sql: r#"
            CREATE INDEX idx_chat_sessions_last_message ON chat_sessions(last_message_at DESC NULLS LAST);
            CREATE INDEX idx_notifications_created ON notifications(created_at DESC);
            CREATE INDEX idx_share_links_expires ON share_links(expires_at);
            CREATE INDEX idx_dashboards_default ON dashboards(is_default) WHERE is_default;
        "#.to_string(),
        down_sql: r#"
            DROP INDEX IF EXISTS idx_chat_sessions_last_message;
            DROP INDEX IF EXISTS idx_notifications_created;
            DROP INDEX IF EXISTS idx_share_links_expires;
            DROP INDEX IF EXISTS idx_dashboards_default;
        "#.to_string(),
        dependencies: vec![
            "20250601_000012".to_string(),
            "20250601_000014".to_string(),
            "20250601_000015".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered() {
        let migrations = get_all_migrations();
        let mut versions: Vec<&str> = migrations.iter().map(|m| m.version.as_str()).collect();
        let sorted = {
            let mut v = versions.clone();
            v.sort();
            v
        };
        assert_eq!(versions, sorted, "迁移必须按版本号排序");
        versions.dedup();
        assert_eq!(versions.len(), migrations.len(), "迁移版本号必须唯一");
    }

    #[test]
    fn test_dashboard_owner_check_present() {
        let migration = create_dashboards_table();
        assert!(migration.up_sql.contains("dashboard_owner_check"));
        assert!(migration.up_sql.contains("(owner_user_id IS NULL) <> (owner_team_id IS NULL)"));
    }

    #[test]
    fn test_chart_owner_check_present() {
        let migration = create_charts_table();
        assert!(migration.up_sql.contains("chart_owner_check"));
    }

    #[test]
    fn test_chart_versions_unique_per_chart() {
        let migration = create_chart_versions_table();
        assert!(migration.up_sql.contains("UNIQUE (chart_id, version)"));
    }

    #[test]
    fn test_dependencies_reference_known_versions() {
        let migrations = get_all_migrations();
        let versions: Vec<String> = migrations.iter().map(|m| m.version.clone()).collect();
        for migration in &migrations {
            for dep in &migration.dependencies {
                assert!(versions.contains(dep), "依赖 {} 不存在", dep);
            }
        }
    }

    #[test]
    fn test_every_up_has_down() {
        for migration in get_all_migrations() {
            assert!(!migration.up_sql.trim().is_empty());
            assert!(!migration.down_sql.trim().is_empty());
        }
    }
}
