// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: flags, subcommands and the screen runner.
//!
//! Every subcommand drives one screen through a [`NavigationSynchronizer`]
//! and reports the rendered container plus any notifications.

pub mod paths;

use crate::application::port::{CatalogApi, Collection, ListFilters, Upload};
use crate::application::query::pagination::edit_url;
use crate::config::{self, Config};
use crate::domain::AlbumFields;
use crate::error::{Error, Result};
use crate::infrastructure::http::{fetch_remote_ui_config, CatalogClient};
use crate::media::{shared_cache, PrefetchConfig};
use crate::ui::elements::{Card, RenderContext, Renderable};
use crate::ui::notifications::{Manager, Notification};
use crate::ui::screens::{
    AlbumListScreen, AlbumScreen, AuthorScreen, EditorScreen, ListingScreen, ViewerScreen,
};
use crate::ui::sync::{NavigationSynchronizer, ViewState};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const USAGE: &str = "\
Usage: minori <command> [args] [options]

Commands:
  albums [page]               List albums (the bookshelf)
  list                        List every album on one page
  authors [page]              List authors
  aliases [page]              List author aliases
  author <author[:page]>      Show an author and their albums
  album <album>               Show an album's details and thumbnails
  view <album[:image]>...     Show one image with navigation links, stepping
                              through each address in turn
  create-album                Create an album from the field options
  edit-album <album>          Update an album from the field options
  hide <album>                Hide an album from the listings
  show <album>                Show a hidden album again
  delete-album <album>        Delete an album (maintenance mode)
  move-up <album> <image>     Move an image one slot towards the front
  move-down <album> <image>   Move an image one slot towards the back
  bake <album>                Assign sequential order keys
  cover <album> <image>       Make an image the album cover
  delete-image <album> <image>
                              Delete an image (maintenance mode)
  upload <album> <file>       Add an image, or every image of a zip/cbz archive

Options:
  --config <path>             Read settings from this file
  --api-url <url>             Override the catalog API URL
  --origin <url>              Merge the UI config published at <url>/.ui/config.json
  --save <path>               view: write the displayed image to <path>
  --title, --author, --description, --url <text>
                              Album fields for create-album and edit-album
";

/// Options that only some commands take.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Album fields for `create-album` and `edit-album`.
    pub fields: AlbumFields,
    /// Where `view` writes the displayed image.
    pub save: Option<PathBuf>,
}

/// An action applied through the album editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    UpdateDetails(AlbumFields),
    SetHidden(bool),
    DeleteAlbum,
    MoveUp(String),
    MoveDown(String),
    Bake,
    Cover(String),
    DeleteImage(String),
    /// Image or archive file to upload.
    Upload(PathBuf),
}

/// Subcommand with its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Albums { page: String },
    List,
    Authors { page: String },
    Aliases { page: String },
    Author { address: String },
    Album { album: String },
    View { addresses: Vec<String>, save: Option<PathBuf> },
    CreateAlbum { fields: AlbumFields },
    Edit { album: String, action: EditAction },
}

impl Command {
    /// Builds a command from its name, positional arguments and options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unknown commands, missing arguments and
    /// options the command does not take.
    pub fn parse(name: &str, args: &[String], options: CommandOptions) -> Result<Self> {
        let arg = |index: usize, what: &str| -> Result<String> {
            args.get(index)
                .cloned()
                .ok_or_else(|| Error::Config(format!("{name}: missing {what}")))
        };
        let page = || args.first().cloned().unwrap_or_else(|| "1".to_string());
        let edit = |action: EditAction| -> Result<Command> {
            Ok(Command::Edit {
                album: arg(0, "album")?,
                action,
            })
        };
        let edit_image = |action: fn(String) -> EditAction| -> Result<Command> {
            let album = arg(0, "album")?;
            Ok(Command::Edit {
                album,
                action: action(arg(1, "image")?),
            })
        };
        let CommandOptions {
            mut fields,
            mut save,
        } = options;

        let command = match name {
            "albums" => Command::Albums { page: page() },
            "list" => Command::List,
            "authors" => Command::Authors { page: page() },
            "aliases" => Command::Aliases { page: page() },
            "author" => Command::Author {
                address: arg(0, "author")?,
            },
            "album" => Command::Album {
                album: arg(0, "album")?,
            },
            "view" => {
                arg(0, "album")?;
                Command::View {
                    addresses: args.to_vec(),
                    save: save.take(),
                }
            }
            "create-album" => Command::CreateAlbum {
                fields: std::mem::take(&mut fields),
            },
            "edit-album" => {
                if fields == AlbumFields::default() {
                    return Err(Error::Config(format!("{name}: nothing to change")));
                }
                edit(EditAction::UpdateDetails(std::mem::take(&mut fields)))?
            }
            "hide" => edit(EditAction::SetHidden(true))?,
            "show" => edit(EditAction::SetHidden(false))?,
            "delete-album" => edit(EditAction::DeleteAlbum)?,
            "move-up" => edit_image(EditAction::MoveUp)?,
            "move-down" => edit_image(EditAction::MoveDown)?,
            "bake" => edit(EditAction::Bake)?,
            "cover" => edit_image(EditAction::Cover)?,
            "delete-image" => edit_image(EditAction::DeleteImage)?,
            "upload" => {
                let album = arg(0, "album")?;
                Command::Edit {
                    album,
                    action: EditAction::Upload(PathBuf::from(arg(1, "file")?)),
                }
            }
            other => return Err(Error::Config(format!("unknown command '{other}'"))),
        };

        if save.is_some() {
            return Err(Error::Config(format!("{name}: --save only applies to view")));
        }
        if fields != AlbumFields::default() {
            return Err(Error::Config(format!(
                "{name}: album fields only apply to create-album and edit-album"
            )));
        }
        Ok(command)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Settings file overriding the platform config directory.
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    /// Site origin publishing `/.ui/config.json`.
    pub origin: Option<String>,
    pub command: Command,
}

impl Flags {
    /// Parses flags from `args`. The subcommand must come first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed arguments.
    pub fn from_args(mut args: pico_args::Arguments) -> Result<Self> {
        let name: Option<String> = args.subcommand().map_err(arg_error)?;
        let config_path: Option<PathBuf> = args.opt_value_from_str("--config").map_err(arg_error)?;
        let api_url: Option<String> = args.opt_value_from_str("--api-url").map_err(arg_error)?;
        let origin: Option<String> = args.opt_value_from_str("--origin").map_err(arg_error)?;
        let options = CommandOptions {
            fields: AlbumFields {
                title: args.opt_value_from_str("--title").map_err(arg_error)?,
                author: args.opt_value_from_str("--author").map_err(arg_error)?,
                description: args.opt_value_from_str("--description").map_err(arg_error)?,
                url: args.opt_value_from_str("--url").map_err(arg_error)?,
            },
            save: args.opt_value_from_str("--save").map_err(arg_error)?,
        };

        let positional = args
            .finish()
            .into_iter()
            .map(|arg| {
                arg.into_string()
                    .map_err(|_| Error::Config("arguments must be valid UTF-8".to_string()))
            })
            .collect::<Result<Vec<String>>>()?;

        let name = name.ok_or_else(|| Error::Config("missing command".to_string()))?;
        Ok(Self {
            config_path,
            api_url,
            origin,
            command: Command::parse(&name, &positional, options)?,
        })
    }
}

fn arg_error(err: pico_args::Error) -> Error {
    Error::Config(err.to_string())
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Rendered screen content.
    pub body: String,
    /// Notification lines, oldest first.
    pub notices: Vec<String>,
    /// Address the location should move to, if the screen redirected.
    pub redirect: Option<String>,
    /// `true` when the run ended on a missing resource or a failed action.
    pub failed: bool,
}

/// Resolves configuration from flags: file, remote UI config, then overrides.
///
/// # Errors
///
/// Fails when an explicit config file cannot be read or the remote UI config
/// cannot be fetched.
pub async fn resolve_config(flags: &Flags) -> Result<Config> {
    let mut config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                tracing::warn!("{warning}");
            }
            config
        }
    };

    if let Some(origin) = &flags.origin {
        let remote = fetch_remote_ui_config(&config.api, origin).await?;
        config.apply_remote(&remote);
    }
    if let Some(api_url) = &flags.api_url {
        config.api.api_url.clone_from(api_url);
    }
    Ok(config)
}

/// Runs `flags.command` against the HTTP catalog.
///
/// # Errors
///
/// Fails on configuration problems. Catalog failures are reported through
/// [`Report::notices`] instead.
pub async fn run(flags: Flags) -> Result<Report> {
    let config = resolve_config(&flags).await?;
    let api: Arc<dyn CatalogApi> = Arc::new(CatalogClient::new(&config.api)?);
    execute(api, &config, flags.command).await
}

/// Runs `command` against `api`.
///
/// # Errors
///
/// Fails when an upload file cannot be read or a viewed image cannot be
/// saved.
pub async fn execute(api: Arc<dyn CatalogApi>, config: &Config, command: Command) -> Result<Report> {
    let ctx = RenderContext::new(config.api.image_base_url.clone());
    let filters = ListFilters {
        include_disabled: config.ui.include_disabled(),
    };
    let mut sync = NavigationSynchronizer::new();
    let mut notifications = Manager::new();

    let listing = |collection: Collection| {
        ListingScreen::new(Arc::clone(&api), collection, filters, ctx.clone())
    };

    let mut redirect = None;
    let mut action_failed = false;
    let body = match command {
        Command::Albums { page } => {
            let mut screen = listing(Collection::Albums);
            sync.start(&page, &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::List => {
            let mut screen = AlbumListScreen::new(Arc::clone(&api), filters, ctx.clone());
            sync.start("", &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::Authors { page } => {
            let mut screen = listing(Collection::Authors);
            sync.start(&page, &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::Aliases { page } => {
            let mut screen = listing(Collection::AuthorAliases);
            sync.start(&page, &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::Author { address } => {
            let mut screen = AuthorScreen::new(Arc::clone(&api), filters, ctx.clone());
            sync.start(&address, &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::Album { album } => {
            let mut screen = AlbumScreen::new(Arc::clone(&api), ctx.clone());
            sync.start(&album, &mut screen, &mut notifications).await;
            screen.container().render()
        }
        Command::View { addresses, save } => {
            let mut screen = ViewerScreen::new(Arc::clone(&api), ctx.clone());
            if config.prefetch.enabled {
                let prefetch = PrefetchConfig::from(&config.prefetch);
                screen = screen.with_prefetch(shared_cache(prefetch), prefetch.prefetch_count);
            }

            let mut addresses = addresses.iter();
            if let Some(first) = addresses.next() {
                sync.start(first, &mut screen, &mut notifications).await;
                redirect = screen.take_redirect().map(|address| format!("/view.html#{address}"));
            }
            for address in addresses {
                sync.navigate(address, &mut screen, &mut notifications).await;
            }

            if let (Some(path), ViewState::Loaded) = (save, sync.state()) {
                match screen.current_image_bytes().await {
                    Ok(bytes) => {
                        tokio::fs::write(&path, bytes.as_slice()).await?;
                        notifications.push(Notification::success(format!(
                            "Image saved to {}",
                            path.display()
                        )));
                    }
                    Err(err) => {
                        notifications.push(Notification::error(err.user_message()));
                        action_failed = true;
                    }
                }
            }

            match screen.title() {
                Some(title) => format!("{title}\n{}", screen.container().render()),
                None => screen.container().render(),
            }
        }
        Command::CreateAlbum { fields } => {
            let mut screen = listing(Collection::Albums);
            match screen.create_album(&fields, &mut notifications).await {
                Ok(album) => {
                    redirect = Some(edit_url(&album.id));
                    Card::AlbumDetails(album).render(&ctx)
                }
                Err(_) => {
                    action_failed = true;
                    String::new()
                }
            }
        }
        Command::Edit { album, action } => {
            let (body, failed) = edit(&api, config, &ctx, &album, action, &mut sync, &mut notifications).await?;
            action_failed = failed;
            body
        }
    };

    let not_found = sync.state() == ViewState::NotFound;
    Ok(Report {
        body: if not_found { "Not found.".to_string() } else { body },
        notices: notices(&notifications),
        redirect,
        failed: action_failed || not_found,
    })
}

/// Loads the album editor and applies `action`. Returns the rendered editor
/// and whether the action failed.
///
/// # Errors
///
/// Fails when an upload file cannot be read.
async fn edit(
    api: &Arc<dyn CatalogApi>,
    config: &Config,
    ctx: &RenderContext,
    album: &str,
    action: EditAction,
    sync: &mut NavigationSynchronizer,
    notifications: &mut Manager,
) -> Result<(String, bool)> {
    // Deleting needs maintenance mode; the editor honours the same switch.
    let maint_mode = config.ui.include_disabled();
    let mut screen = EditorScreen::new(Arc::clone(api), ctx.clone(), maint_mode);
    sync.start(album, &mut screen, notifications).await;
    if sync.state() != ViewState::Loaded {
        return Ok((screen.container().render(), true));
    }

    let result = match action {
        EditAction::UpdateDetails(fields) => screen.update_details(&fields, notifications).await,
        EditAction::SetHidden(hidden) => screen.set_hidden(hidden, notifications).await,
        EditAction::DeleteAlbum => screen.delete_album(notifications).await,
        EditAction::MoveUp(image) => screen.move_up(&image, notifications).await,
        EditAction::MoveDown(image) => screen.move_down(&image, notifications).await,
        EditAction::Bake => screen.bake(notifications).await,
        EditAction::Cover(image) => screen.make_cover(&image, notifications).await,
        EditAction::DeleteImage(image) => screen.delete_image(&image, notifications).await,
        EditAction::Upload(file) => {
            let upload = read_upload(&file).await?;
            if upload.is_archive() {
                screen.upload_archive(upload, notifications).await.map(|_| ())
            } else {
                screen.upload(upload, notifications).await.map(|_| ())
            }
        }
    };
    Ok((screen.container().render(), result.is_err()))
}

async fn read_upload(file: &Path) -> Result<Upload> {
    let bytes = tokio::fs::read(file).await?;
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(Upload::new(filename, bytes))
}

/// Visible notifications, oldest first.
fn notices(notifications: &Manager) -> Vec<String> {
    let mut lines: Vec<String> = notifications.visible().map(ToString::to_string).collect();
    lines.reverse();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderKey;
    use crate::infrastructure::memory::{InMemoryCatalog, Operation};

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(Into::into).collect())
    }

    fn edit_command(album: &str, action: EditAction) -> Command {
        Command::Edit {
            album: album.to_string(),
            action,
        }
    }

    fn maint_config() -> Config {
        let mut config = Config::default();
        config.ui.allow_maint_mode = true;
        config.ui.maint_mode = true;
        config
    }

    #[test]
    fn parses_subcommand_and_options() {
        let flags = Flags::from_args(args(&["move-up", "--api-url", "http://api", "a1", "i2"])).unwrap();
        assert_eq!(flags.api_url.as_deref(), Some("http://api"));
        assert_eq!(flags.command, edit_command("a1", EditAction::MoveUp("i2".into())));
    }

    #[test]
    fn listing_page_defaults_to_one() {
        let flags = Flags::from_args(args(&["albums"])).unwrap();
        assert_eq!(flags.command, Command::Albums { page: "1".into() });
    }

    #[test]
    fn missing_argument_is_config_error() {
        let err = Flags::from_args(args(&["bake"])).unwrap_err();
        assert_eq!(err, Error::Config("bake: missing album".into()));
        let err = Flags::from_args(args(&["cover"])).unwrap_err();
        assert_eq!(err, Error::Config("cover: missing album".into()));
        assert!(matches!(
            Flags::from_args(args(&["frobnicate"])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn album_fields_come_from_options() {
        let flags = Flags::from_args(args(&["edit-album", "a1", "--title", "New", "--url", "http://src"])).unwrap();
        let fields = AlbumFields {
            title: Some("New".into()),
            url: Some("http://src".into()),
            ..AlbumFields::default()
        };
        assert_eq!(flags.command, edit_command("a1", EditAction::UpdateDetails(fields)));

        let err = Flags::from_args(args(&["edit-album", "a1"])).unwrap_err();
        assert_eq!(err, Error::Config("edit-album: nothing to change".into()));
        assert!(Flags::from_args(args(&["bake", "a1", "--title", "x"])).is_err());
        assert!(Flags::from_args(args(&["album", "a1", "--save", "out.png"])).is_err());
    }

    #[test]
    fn view_takes_several_addresses() {
        let flags = Flags::from_args(args(&["view", "a1:i1", "a1:i2", "--save", "out.png"])).unwrap();
        assert_eq!(
            flags.command,
            Command::View {
                addresses: vec!["a1:i1".into(), "a1:i2".into()],
                save: Some(PathBuf::from("out.png")),
            }
        );
    }

    #[tokio::test]
    async fn view_without_image_reports_redirect() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let image = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;

        let command = Command::View {
            addresses: vec![album.clone()],
            save: None,
        };
        let report = execute(catalog.clone(), &Config::default(), command).await.unwrap();

        assert!(!report.failed);
        assert_eq!(report.redirect, Some(format!("/view.html#{album}:{image}")));
        assert!(report.body.starts_with("Trip (1/1)"));
        assert_eq!(catalog.call_count(Operation::FetchImage).await, 0);
    }

    #[tokio::test]
    async fn view_steps_and_saves_the_last_image() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let a = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;
        let b = catalog.seed_image(&album, "b.png", OrderKey::new(2)).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shown.png");

        let command = Command::View {
            addresses: vec![format!("{album}:{a}"), format!("{album}:{b}")],
            save: Some(path.clone()),
        };
        let report = execute(catalog.clone(), &Config::default(), command).await.unwrap();

        assert!(!report.failed);
        assert!(report.body.starts_with("Trip (2/2)"));
        assert_eq!(std::fs::read(&path).unwrap(), b"b.png");
        assert_eq!(catalog.call_count(Operation::ListItems).await, 1);
    }

    #[tokio::test]
    async fn missing_album_fails_the_run() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let command = edit_command("nope", EditAction::MoveUp("x".into()));
        let report = execute(catalog, &Config::default(), command).await.unwrap();

        assert!(report.failed);
        assert_eq!(report.body, "Not found.");
    }

    #[tokio::test]
    async fn boundary_move_is_reported() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let image = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;

        let command = edit_command(&album, EditAction::MoveDown(image));
        let report = execute(catalog, &Config::default(), command).await.unwrap();

        assert!(report.failed);
        assert_eq!(report.notices, vec!["[info] cannot move down: already last".to_string()]);
    }

    #[tokio::test]
    async fn cover_and_details_are_reachable() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let image = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;

        let report = execute(
            catalog.clone(),
            &Config::default(),
            edit_command(&album, EditAction::Cover(image.clone())),
        )
        .await
        .unwrap();
        assert!(!report.failed);
        assert!(catalog.get_album(&album).await.unwrap().is_cover(&image));

        let fields = AlbumFields {
            title: Some("Renamed".into()),
            ..AlbumFields::default()
        };
        let report = execute(
            catalog.clone(),
            &Config::default(),
            edit_command(&album, EditAction::UpdateDetails(fields)),
        )
        .await
        .unwrap();
        assert!(report.body.starts_with("Renamed (active)"));
    }

    #[tokio::test]
    async fn deleting_needs_maintenance_mode() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let image = catalog.seed_image(&album, "a.png", OrderKey::new(1)).await;

        let refused = execute(
            catalog.clone(),
            &Config::default(),
            edit_command(&album, EditAction::DeleteImage(image.clone())),
        )
        .await
        .unwrap();
        assert!(refused.failed);
        assert_eq!(catalog.list_items(&album).await.unwrap().len(), 1);

        let report = execute(
            catalog.clone(),
            &maint_config(),
            edit_command(&album, EditAction::DeleteImage(image)),
        )
        .await
        .unwrap();
        assert!(!report.failed);
        assert!(catalog.list_items(&album).await.unwrap().is_empty());

        let report = execute(catalog.clone(), &maint_config(), edit_command(&album, EditAction::DeleteAlbum))
            .await
            .unwrap();
        assert!(!report.failed);
        assert!(catalog.get_album(&album).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn hidden_album_leaves_the_full_list() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;

        execute(catalog.clone(), &Config::default(), edit_command(&album, EditAction::SetHidden(true)))
            .await
            .unwrap();
        let list = execute(catalog.clone(), &Config::default(), Command::List).await.unwrap();

        assert_eq!(list.body, "0 albums");
        assert!(catalog.get_album(&album).await.unwrap().disabled);
    }

    #[tokio::test]
    async fn created_album_redirects_to_its_editor() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let fields = AlbumFields {
            title: Some("Fresh".into()),
            ..AlbumFields::default()
        };

        let report = execute(catalog.clone(), &Config::default(), Command::CreateAlbum { fields })
            .await
            .unwrap();

        let album = &catalog.list_all_albums(ListFilters::default()).await.unwrap()[0];
        assert_eq!(report.redirect, Some(format!("/edit.html#{}", album.id)));
        assert!(report.body.starts_with("Fresh (active)"));
    }

    #[tokio::test]
    async fn archive_files_take_the_archive_path() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        catalog.register_archive("pages.cbz", &["1.png", "2.png"]).await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pages.cbz");
        tokio::fs::write(&file, b"PK").await.unwrap();

        let report = execute(catalog.clone(), &Config::default(), edit_command(&album, EditAction::Upload(file)))
            .await
            .unwrap();

        assert!(!report.failed);
        assert_eq!(catalog.call_count(Operation::UploadArchive).await, 1);
        assert_eq!(catalog.call_count(Operation::CreateItem).await, 0);
        assert_eq!(catalog.list_items(&album).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unreadable_upload_is_an_error() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let album = catalog.seed_album("Trip").await;
        let command = edit_command(&album, EditAction::Upload(PathBuf::from("/nonexistent/x.png")));

        let err = execute(catalog, &Config::default(), command).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
