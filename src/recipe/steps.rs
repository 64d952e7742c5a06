use regex::Regex;

use super::{Step, StepContext};
use crate::artifacts::{APTFILE, SIDEKIQ_CONFIG};
use crate::constants::{DATABASE_CONFIG, GEMFILE};
use crate::error::Result;
use crate::options::{Database, Options};
use crate::patcher::Section;

const README: &str = r#"# Dockerdev
Imitating Martian technology.
[Terraforming Rails](https://github.com/evilmartians/terraforming-rails)
[dockerdev](https://github.com/evilmartians/terraforming-rails/tree/master/examples/dockerdev)

## Provision
```sh
dip provision
```
"#;

const MARGINALIA_INITIALIZER: &str = "\
# frozen_string_literal: true
require 'marginalia'
Marginalia::Comment.components = %i(application controller_with_namespace action job)
";

const AR_LOG_RAKEFILE: &str = "\
# frozen_string_literal: true
task ar_log: :environment do
  ActiveRecord::Base.logger = Logger.new(STDOUT)
end
";

const RUBOCOP_CONFIG: &str = "\
AllCops:
  NewCops: enable
  Exclude:
    - 'bin/*'
    - 'db/**/*'
    - 'node_modules/**/*'
    - 'vendor/**/*'

Style/Documentation:
  Enabled: false
";

const GENERATOR_SETTING: &str = "\
config.generators do |g|
  g.assets false
  g.helper false
  g.test_framework false
end
";

const SIDEKIQ_ROUTE: &str = "\
if Rails.env.development?
  require(\"sidekiq/web\")
  mount Sidekiq::Web => \"/sidekiq\"
end
";

/// Records the freshly generated skeleton, listing the run options in the
/// commit body.
pub struct RailsNew;

impl Step for RailsNew {
    fn name(&self) -> &'static str {
        "rails new"
    }

    fn commit_message(&self, options: &Options) -> String {
        let database = options.database.as_ref().map_or("none", Database::as_str);
        format!(
            "{}\n\n---options---\napp_name: {}\ndatabase: {}\n---options---",
            self.name(),
            options.app_name,
            database
        )
    }

    fn run(&self, _ctx: &StepContext) -> Result<()> {
        Ok(())
    }
}

/// Replaces the generated README with provisioning instructions.
pub struct Readme;

impl Step for Readme {
    fn name(&self) -> &'static str {
        "readme"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.remove_file("README.md")?;
        ctx.project.create_file("README.md", README)
    }
}

/// Adds schema annotations to models via the annotate gem.
pub struct Annotate;

impl Step for Annotate {
    fn name(&self) -> &'static str {
        "annotate"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.gem("annotate", None, Some("development"))?;
        ctx.project.bundle_install()?;
        ctx.project.rails_command(&["generate", "annotate:install"])
    }
}

/// Tags SQL queries with their origin via marginalia.
pub struct Marginalia;

impl Step for Marginalia {
    fn name(&self) -> &'static str {
        "marginalia"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.gem("marginalia", None, None)?;
        ctx.project.bundle_install()?;
        ctx.project.initializer("marginalia.rb", MARGINALIA_INITIALIZER)
    }
}

/// Adds a rake task that logs ActiveRecord queries to stdout.
pub struct ArLogTask;

impl Step for ArLogTask {
    fn name(&self) -> &'static str {
        "ar_log task"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.rakefile("ar_log.rake", AR_LOG_RAKEFILE)
    }
}

/// Sets up rubocop with a project-wide config.
pub struct Rubocop;

impl Step for Rubocop {
    fn name(&self) -> &'static str {
        "rubocop"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.create_file(".rubocop.yml", RUBOCOP_CONFIG)?;
        ctx.project.gem("rubocop", None, Some("development"))?;
        ctx.project.bundle_install()
    }
}

/// Turns off the generators nobody wants scaffolded.
pub struct GeneratorSetting;

impl Step for GeneratorSetting {
    fn name(&self) -> &'static str {
        "generator_setting"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        ctx.project.environment(GENERATOR_SETTING)
    }
}

/// Provisions the Docker development environment: compose stack, dip config,
/// image build files, sidekiq, and the database connection rewrite.
///
/// Skipped entirely when no supported engine is selected.
pub struct Dockerdev;

impl Step for Dockerdev {
    fn name(&self) -> &'static str {
        "dockerdev"
    }

    fn applies(&self, options: &Options) -> bool {
        options.database.is_some()
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        let artifacts = ctx.artifacts;
        ctx.project.create_file("dip.yml", &artifacts.dip_yml()?)?;
        ctx.project.create_file("docker-compose.yml", &artifacts.docker_compose_yml()?)?;
        ctx.project.create_file(".dockerdev/app/Dockerfile", &artifacts.dockerfile()?)?;
        ctx.project.create_file(".dockerdev/app/Aptfile", APTFILE)?;

        if ctx.options.database == Some(Database::Mysql) {
            // Generated skeletons default to sqlite3 unless told otherwise.
            let sqlite = Regex::new(r#"gem ['"]sqlite3"#)?;
            ctx.project.comment_lines(GEMFILE, &sqlite)?;
            ctx.project.gem("mysql2", Some(">= 0.4.4"), None)?;
        }
        ctx.project.gem("sidekiq", None, None)?;
        ctx.project.create_file("config/sidekiq.yml", SIDEKIQ_CONFIG)?;
        ctx.project.bundle_install()?;

        ctx.project.gsub_file(
            DATABASE_CONFIG,
            &Section::Default.pattern()?,
            artifacts.database_yml_default(),
        )?;
        ctx.project.gsub_file(
            DATABASE_CONFIG,
            &Section::Development.pattern()?,
            &artifacts.database_yml_development(),
        )?;
        ctx.project.gsub_file(
            DATABASE_CONFIG,
            &Section::Test.pattern()?,
            &artifacts.database_yml_test(),
        )?;
        ctx.project.gsub_file(
            DATABASE_CONFIG,
            &Section::Production.pattern()?,
            &artifacts.database_yml_production(),
        )?;

        ctx.project.environment("config.active_job.queue_adapter = :sidekiq\n")?;
        ctx.project.route(SIDEKIQ_ROUTE)
    }
}
