//! Orvian command line driver
//!
//! Usage:
//!   orvian login --email ada@example.com
//!   orvian new "My Scene"
//!   orvian add <project> cube
//!   orvian set <project> <object> --position 1,0,2 --color '#ff0000'
//!   orvian export <project> --out scene.json

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use orvian::auth::AuthState;
use orvian::config::Settings;
use orvian::editor::{EditorStore, ViewPrefs};
use orvian::scene::{library, Category, Color, ObjectKind, ObjectPatch, SceneError, Vec3};
use orvian::storage::LocalStorage;
use orvian::{ObjectId, ProjectId};

#[derive(Parser)]
#[command(name = "orvian", version)]
#[command(about = "Manage Orvian 3D scene projects")]
struct Cli {
    /// Storage directory (overrides the settings file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in (any credentials are accepted)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Display name (defaults to the part of the email before '@')
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the object library
    Library {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    #[command(flatten)]
    Project(ProjectCommand),
}

/// Commands that need a signed-in user and the project catalog
#[derive(Subcommand)]
enum ProjectCommand {
    /// List projects
    List,
    /// Create a project
    New { name: String },
    /// Show a project's objects
    Show { project: String },
    /// Delete a project
    Delete { project: String },
    /// Add an object to a project
    Add {
        project: String,
        /// Object type, e.g. cube, water, spot
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Category; checked against the type when given
        #[arg(long)]
        category: Option<String>,
    },
    /// Duplicate an object
    Duplicate { project: String, object: String },
    /// Remove an object
    Remove { project: String, object: String },
    /// Change object properties
    Set {
        project: String,
        object: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        position: Option<Vec3>,
        /// Rotation in degrees
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        rotation_deg: Option<Vec3>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        scale: Option<Vec3>,
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
        #[arg(long, allow_hyphen_values = true)]
        metalness: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        roughness: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        intensity: Option<f64>,
        #[arg(long)]
        cast_shadow: Option<bool>,
    },
    /// Write a project with its objects as JSON
    Export {
        project: String,
        /// Output file (defaults to "<project name>.json")
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {:?}", s));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("{:?} is not a number", part))?;
    }
    Ok(out)
}

fn parse_color(s: &str) -> Result<Color, SceneError> {
    s.parse()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.resolved_data_dir());
    log::debug!("storage directory: {}", data_dir.display());

    let mut storage = LocalStorage::with_base_dir(&data_dir);
    let mut auth = AuthState::load(&storage).context("Failed to read session")?;

    match cli.command {
        Commands::Login {
            email,
            password,
            name,
        } => {
            let user = auth.login(&mut storage, &email, &password, name.as_deref())?;
            println!("Signed in as {} <{}>", user.name, user.email);
        }
        Commands::Logout => {
            auth.logout(&mut storage)?;
            println!("Signed out");
        }
        Commands::Whoami => match auth.user() {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not signed in"),
        },
        Commands::Library { category, search } => {
            let tab = category.as_deref().map(str::parse::<Category>).transpose()?;
            for item in library::filter(tab, &search) {
                let shortcut = item.shortcut.map(|c| format!(" [{}]", c)).unwrap_or_default();
                println!(
                    "{:<12} {:<12} {}{}",
                    item.kind.type_name(),
                    item.label,
                    item.description,
                    shortcut
                );
            }
        }
        Commands::Project(command) => {
            let mut store = open_store(&auth, storage, settings.view_prefs())?;
            run_project_command(&mut store, command)?;
        }
    }
    Ok(())
}

/// Open the project store for a signed-in user and load the catalog
fn open_store(auth: &AuthState, storage: LocalStorage, view: ViewPrefs) -> Result<EditorStore> {
    if !auth.is_authenticated() {
        bail!("Not signed in; run `orvian login --email <email>` first");
    }

    let data_dir = storage.base_dir().to_path_buf();
    let mut store = EditorStore::with_view(Box::new(storage), view);
    store
        .load_projects_from_storage()
        .with_context(|| format!("Cannot read projects from {}", data_dir.display()))?;
    Ok(store)
}

/// Open a project, run `f` against the store, then save
fn edit_project<T>(
    store: &mut EditorStore,
    project: &str,
    f: impl FnOnce(&mut EditorStore) -> Result<T>,
) -> Result<T> {
    store
        .load_project(&ProjectId::from(project))
        .with_context(|| format!("Cannot open project {}", project))?;
    let out = f(store)?;
    store.save_project().context("Failed to save project")?;
    Ok(out)
}

fn run_project_command(store: &mut EditorStore, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List => {
            if store.projects().is_empty() {
                println!("No projects yet");
            }
            for p in store.projects() {
                println!("{}  {:<24} {} object(s)", p.id, p.name, p.objects.len());
            }
        }
        ProjectCommand::New { name } => {
            let id = store.create_project(&name)?;
            println!("{}", id);
        }
        ProjectCommand::Show { project } => {
            store.load_project(&ProjectId::from(project.as_str()))?;
            let view = *store.view();
            if let Some(p) = store.current_project() {
                println!("{} ({})", p.name, p.id);
            }
            println!(
                "grid: {} (size {}), sky: {}",
                if view.grid_visible { "on" } else { "off" },
                view.grid_size,
                view.sky_mode.label()
            );
            for obj in store.objects() {
                let rot = obj.rotation_degrees();
                println!(
                    "  {}  {:<20} {:<20} pos {:?} rot° [{:.0}, {:.0}, {:.0}] scale {:?} {}",
                    obj.id,
                    obj.name,
                    obj.kind.to_string(),
                    obj.position,
                    rot[0],
                    rot[1],
                    rot[2],
                    obj.scale,
                    obj.color
                );
            }
            let lights = store.lights().count();
            if lights > 0 {
                println!("{} light(s)", lights);
            }
        }
        ProjectCommand::Delete { project } => {
            store.delete_project(&ProjectId::from(project.as_str()))?;
            println!("Deleted {}", project);
        }
        ProjectCommand::Add {
            project,
            type_name,
            category,
        } => {
            let id = edit_project(store, &project, |store| {
                Ok(match category {
                    Some(c) => store.add_object_by_name(&type_name, &c)?,
                    None => store.add_object(ObjectKind::from_type_name(&type_name)?),
                })
            })?;
            println!("{}", id);
        }
        ProjectCommand::Duplicate { project, object } => {
            let id = edit_project(store, &project, |store| {
                Ok(store.duplicate_object(&ObjectId::from(object.as_str()))?)
            })?;
            println!("{}", id);
        }
        ProjectCommand::Remove { project, object } => {
            let removed = edit_project(store, &project, |store| {
                Ok(store.delete_object(&ObjectId::from(object.as_str()))?)
            })?;
            println!("Removed {}", removed.name);
        }
        ProjectCommand::Set {
            project,
            object,
            name,
            position,
            rotation_deg,
            scale,
            color,
            metalness,
            roughness,
            intensity,
            cast_shadow,
        } => {
            let mut patch = ObjectPatch {
                name,
                position,
                scale,
                color,
                metalness,
                roughness,
                intensity,
                cast_shadow,
                ..ObjectPatch::default()
            };
            if let Some(deg) = rotation_deg {
                patch = patch.rotation_degrees(deg);
            }
            if patch.is_empty() {
                bail!("Nothing to change");
            }
            edit_project(store, &project, |store| {
                Ok(store.update_object(&ObjectId::from(object.as_str()), &patch)?)
            })?;
        }
        ProjectCommand::Export { project, out } => {
            store.load_project(&ProjectId::from(project.as_str()))?;
            let export = store.export_current()?;
            let path = out.unwrap_or_else(|| PathBuf::from(export.file_name()));
            std::fs::write(&path, export.to_json()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orvian::scene::EnvironmentKind;
    use tempfile::TempDir;

    fn signed_in(dir: &TempDir) -> (AuthState, LocalStorage) {
        let mut storage = LocalStorage::with_base_dir(dir.path());
        let mut auth = AuthState::new();
        auth.login(&mut storage, "ada@example.com", "", None).unwrap();
        (auth, storage)
    }

    fn reopen(dir: &TempDir) -> EditorStore {
        let (auth, storage) = signed_in(dir);
        open_store(&auth, storage, ViewPrefs::default()).unwrap()
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), [1.0, -2.5, 3.0]);
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "orvian", "set", "p1", "o1", "--position", "-1,0,2", "--color", "#ff0000",
        ])
        .unwrap();
        match cli.command {
            Commands::Project(ProjectCommand::Set {
                position, color, ..
            }) => {
                assert_eq!(position, Some([-1.0, 0.0, 2.0]));
                assert_eq!(color, Some(Color::rgb(0xff, 0, 0)));
            }
            _ => panic!("expected set"),
        }
        assert!(matches!(
            Cli::try_parse_from(["orvian", "whoami"]).unwrap().command,
            Commands::Whoami
        ));
    }

    #[test]
    fn test_signed_out_is_refused() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        let auth = AuthState::load(&storage).unwrap();

        let err = open_store(&auth, storage, ViewPrefs::default()).unwrap_err();
        assert!(err.to_string().contains("Not signed in"));
        assert!(!dir.path().join("orvian_projects.json").exists());
    }

    #[test]
    fn test_corrupt_catalog_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("orvian_projects.json"), "[{").unwrap();
        let (auth, storage) = signed_in(&dir);
        assert!(open_store(&auth, storage, ViewPrefs::default()).is_err());
    }

    #[test]
    fn test_object_commands_are_saved() {
        let dir = TempDir::new().unwrap();
        let mut store = reopen(&dir);
        let project = store.create_project("Pond").unwrap().to_string();

        run_project_command(
            &mut store,
            ProjectCommand::Add {
                project: project.clone(),
                type_name: "water".into(),
                category: None,
            },
        )
        .unwrap();

        let mut fresh = reopen(&dir);
        let saved = fresh.projects()[0].objects.clone();
        assert_eq!(saved.len(), 1);
        assert_eq!(
            saved[0].kind,
            ObjectKind::Environment(EnvironmentKind::Water)
        );

        let object = saved[0].id.to_string();
        run_project_command(
            &mut fresh,
            ProjectCommand::Set {
                project: project.clone(),
                object: object.clone(),
                name: None,
                position: Some([-1.0, 2.0, 3.0]),
                rotation_deg: None,
                scale: None,
                color: None,
                metalness: None,
                roughness: None,
                intensity: None,
                cast_shadow: None,
            },
        )
        .unwrap();
        run_project_command(
            &mut fresh,
            ProjectCommand::Duplicate {
                project: project.clone(),
                object,
            },
        )
        .unwrap();

        let objects = reopen(&dir).projects()[0].objects.clone();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].position, [-1.0, 2.0, 3.0]);
        assert_eq!(objects[1].name, "Water Copy");
        assert_eq!(objects[1].position, [0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unknown_project_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut store = reopen(&dir);
        let result = run_project_command(
            &mut store,
            ProjectCommand::Add {
                project: "missing".into(),
                type_name: "cube".into(),
                category: None,
            },
        );
        assert!(result.is_err());
        assert!(store.projects().is_empty());
    }
}
