// 数据库管理 CLI 工具
// 提供迁移、种子数据等命令行功能

use crate::config::AppConfig;
use crate::db::migrations::{MigrationManager, SeedDataManager};
use crate::errors::EnerboardError;
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

/// CLI 命令
#[derive(Debug, Clone)]
pub enum CliCommand {
    /// 迁移相关命令
    Migration(MigrationCommand),
    /// 种子数据相关命令
    Seed(SeedCommand),
}

/// 迁移命令
#[derive(Debug, Clone)]
pub enum MigrationCommand {
    /// 初始化迁移系统
    Init,
    /// 检查迁移状态
    Status,
    /// 应用迁移
    Migrate,
    /// 回滚迁移
    Rollback { version: String },
    /// 验证数据库架构
    Validate,
}

/// 种子数据命令
#[derive(Debug, Clone)]
pub enum SeedCommand {
    /// 初始化种子数据
    Init,
    /// 清理种子数据
    Clean,
    /// 重新初始化种子数据
    Reseed,
}

/// CLI 执行器
pub struct CliExecutor {
    db: DatabaseConnection,
    #[allow(dead_code)]
    config: AppConfig,
}

impl CliExecutor {
    /// 创建新的 CLI 执行器
    pub async fn new(config: AppConfig) -> Result<Self, EnerboardError> {
        let db = Database::connect(&config.database.url).await?;

        Ok(Self { db, config })
    }

    /// 执行 CLI 命令
    pub async fn execute(&self, command: CliCommand) -> Result<(), EnerboardError> {
        match command {
            CliCommand::Migration(cmd) => self.execute_migration_command(cmd).await,
            CliCommand::Seed(cmd) => self.execute_seed_command(cmd).await,
        }
    }

    /// 执行迁移命令
    async fn execute_migration_command(&self, command: MigrationCommand) -> Result<(), EnerboardError> {
        let manager = MigrationManager::new(self.db.clone());

        match command {
            MigrationCommand::Init => {
                info!("初始化迁移系统...");
                manager.init().await?;
                println!("✅ 迁移系统初始化完成");
            }
            MigrationCommand::Status => {
                info!("检查迁移状态...");
                let status = manager.check_status().await?;

                println!("📊 迁移状态:");
                println!("{:<20} {:<35} {:<15} {:<20}", "版本", "名称", "状态", "应用时间");
                println!("{}", "-".repeat(90));

                for migration in status {
                    let status_str = if migration.is_applied { "✅ 已应用" } else { "⏳ 待应用" };
                    let applied_at = migration.applied_at
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "-".to_string());

                    println!(
                        "{:<20} {:<35} {:<15} {:<20}",
                        migration.version,
                        migration.name,
                        status_str,
                        applied_at
                    );
                }
            }
            MigrationCommand::Migrate => {
                info!("应用迁移...");
                let applied = manager.migrate().await?;

                if applied.is_empty() {
                    println!("✅ 没有待应用的迁移");
                } else {
                    println!("✅ 成功应用 {} 个迁移:", applied.len());
                    for version in applied {
                        println!("  - {}", version);
                    }
                }
            }
            MigrationCommand::Rollback { version } => {
                info!("回滚迁移: {}", version);
                manager.rollback(&version).await?;
                println!("✅ 迁移 {} 回滚完成", version);
            }
            MigrationCommand::Validate => {
                info!("验证数据库架构...");
                let validation = manager.validate_schema().await?;

                if validation.is_valid {
                    println!("✅ 数据库架构验证通过");
                } else {
                    println!("❌ 数据库架构验证失败:");

                    if !validation.missing_tables.is_empty() {
                        println!("  缺失的表:");
                        for table in validation.missing_tables {
                            println!("    - {}", table);
                        }
                    }

                    if !validation.errors.is_empty() {
                        println!("  错误:");
                        for error in validation.errors {
                            println!("    - {}", error);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// 执行种子数据命令
    async fn execute_seed_command(&self, command: SeedCommand) -> Result<(), EnerboardError> {
        let manager = SeedDataManager::new(self.db.clone());

        match command {
            SeedCommand::Init => {
                info!("初始化种子数据...");
                manager.seed_all().await?;
                println!("✅ 种子数据初始化完成");
            }
            SeedCommand::Clean => {
                info!("清理种子数据...");
                manager.clean_all().await?;
                println!("✅ 种子数据清理完成");
            }
            SeedCommand::Reseed => {
                info!("重新初始化种子数据...");
                manager.clean_all().await?;
                manager.seed_all().await?;
                println!("✅ 种子数据重新初始化完成");
            }
        }

        Ok(())
    }
}

/// 解析命令行参数
pub fn parse_args(args: Vec<String>) -> Result<CliCommand, EnerboardError> {
    if args.len() < 2 {
        return Err(EnerboardError::validation("args", "请提供命令"));
    }

    match args[1].as_str() {
        "migration" | "migrate" => {
            if args.len() < 3 {
                return Err(EnerboardError::validation("migration", "请提供迁移子命令"));
            }

            let subcommand = match args[2].as_str() {
                "init" => MigrationCommand::Init,
                "status" => MigrationCommand::Status,
                "migrate" | "up" => MigrationCommand::Migrate,
                "rollback" | "down" => {
                    if args.len() < 4 {
                        return Err(EnerboardError::validation("version", "请提供要回滚的版本"));
                    }
                    MigrationCommand::Rollback { version: args[3].clone() }
                }
                "validate" => MigrationCommand::Validate,
                _ => return Err(EnerboardError::validation("migration", "未知的迁移子命令")),
            };

            Ok(CliCommand::Migration(subcommand))
        }
        "seed" => {
            if args.len() < 3 {
                return Err(EnerboardError::validation("seed", "请提供种子数据子命令"));
            }

            let subcommand = match args[2].as_str() {
                "init" => SeedCommand::Init,
                "clean" => SeedCommand::Clean,
                "reseed" => SeedCommand::Reseed,
                _ => return Err(EnerboardError::validation("seed", "未知的种子数据子命令")),
            };

            Ok(CliCommand::Seed(subcommand))
        }
        _ => Err(EnerboardError::validation("command", "未知命令")),
    }
}

/// 打印帮助信息
pub fn print_help() {
    println!("EnerBoard 数据库管理工具");
    println!();
    println!("用法: enerboard-db <命令> [子命令] [参数]");
    println!();
    println!("命令:");
    println!("  migration init              初始化迁移系统");
    println!("  migration status            检查迁移状态");
    println!("  migration migrate           应用待处理的迁移");
    println!("  migration rollback <版本>   回滚指定版本的迁移");
    println!("  migration validate          验证数据库架构");
    println!();
    println!("  seed init                   初始化种子数据");
    println!("  seed clean                  清理种子数据");
    println!("  seed reseed                 重新初始化种子数据");
    println!();
    println!("环境变量:");
    println!("  ENERBOARD_DATABASE__URL     数据库连接地址");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_migration_commands() {
        assert!(matches!(
            parse_args(args(&["enerboard-db", "migration", "status"])),
            Ok(CliCommand::Migration(MigrationCommand::Status))
        ));
        assert!(matches!(
            parse_args(args(&["enerboard-db", "migrate", "up"])),
            Ok(CliCommand::Migration(MigrationCommand::Migrate))
        ));
    }

    #[test]
    fn test_parse_rollback_requires_version() {
        assert!(parse_args(args(&["enerboard-db", "migration", "rollback"])).is_err());
        assert!(matches!(
            parse_args(args(&["enerboard-db", "migration", "rollback", "20250601_000001"])),
            Ok(CliCommand::Migration(MigrationCommand::Rollback { .. }))
        ));
    }

    #[test]
    fn test_parse_seed_commands() {
        assert!(matches!(
            parse_args(args(&["enerboard-db", "seed", "init"])),
            Ok(CliCommand::Seed(SeedCommand::Init))
        ));
        assert!(parse_args(args(&["enerboard-db", "seed", "unknown"])).is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_args(args(&["enerboard-db", "bogus"])).is_err());
        assert!(parse_args(args(&["enerboard-db"])).is_err());
    }
}
