//! Console surface: a line-oriented stand-in for a richer view layer.
//!
//! Owns the fetched collections and per-list [`BrowseState`] values, routes
//! parsed commands to the engines and the lifecycle manager, and prints the
//! derived slices. Command failures are printed and never unwind the loop;
//! mutation failures leave the previously displayed state intact.

mod commands;
mod render;

pub use commands::{parse, Command, CommandError};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::activity;
use crate::api::{ApiClient, Author, NewPost, Post, PostPatch};
use crate::browse::BrowseState;
use crate::config::Config;
use crate::posts::PostManager;
use crate::query::{sort_posts, PostSort};

/// Posts shown on an author's detail view after sorting.
const AUTHOR_TOP_POSTS: usize = 5;

const HELP: &str = "\
commands:
  authors                                  list authors
  posts                                    list posts (newest first)
  author <id>                              author detail with their top posts
  post <id>                                full post
  search <text>                            filter the active list (empty text clears)
  pick <n>                                 select the n-th suggestion
  sort likes|comments                      toggle sorting on the active post list
  page <n> | next | prev                   pagination
  new <authorId> | <title> | <description> create a post
  retry                                    resubmit the kept draft after a failure
  edit <id> | <title> | <description>      edit a post
  delete <id>                              delete a post
  likes <id> | comments <id>               show a post's likes or comments
  refresh                                  refetch the active view
  quit";

/// Which list the search/sort/page commands currently apply to.
enum View {
    Authors,
    Posts,
    AuthorDetail {
        author: Author,
        posts: Vec<Post>,
        active_sort: Option<PostSort>,
    },
    PostDetail(Post),
}

struct Session {
    client: ApiClient,
    authors: Vec<Author>,
    author_browse: BrowseState,
    post_browse: BrowseState,
    posts: PostManager,
    view: View,
}

/// Run the command loop until EOF or `quit`.
///
/// # Errors
///
/// Returns an error only for stdin failures; command errors are printed and
/// the loop continues.
pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(config).context("Failed to build API client")?;
    let mut session = Session::new(client, config);

    println!("blog-browser — type 'help' for commands");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                debug!(?command, "Executing command");
                if let Err(e) = session.execute(command).await {
                    println!("error: {e:#}");
                }
            }
            Err(e) => println!("{e}"),
        }
        prompt();
    }

    Ok(())
}

fn prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

impl Session {
    fn new(client: ApiClient, config: &Config) -> Self {
        Self {
            client,
            authors: Vec::new(),
            author_browse: BrowseState::new(config.authors_per_page)
                .with_suggestion_limit(config.suggestion_limit),
            post_browse: BrowseState::new(config.posts_per_page)
                .with_suggestion_limit(config.suggestion_limit),
            posts: PostManager::new(),
            view: View::Authors,
        }
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Authors => {
                self.ensure_authors().await?;
                self.view = View::Authors;
                self.render_list();
            }
            Command::Posts => {
                self.ensure_posts().await?;
                self.view = View::Posts;
                self.render_list();
            }
            Command::Author { id } => {
                let author = self
                    .client
                    .get_author(&id)
                    .await
                    .context("Failed to fetch author")?;
                let posts = self
                    .client
                    .posts_by_author(&id)
                    .await
                    .context("Failed to fetch the author's posts")?;
                self.view = View::AuthorDetail {
                    author,
                    posts,
                    active_sort: None,
                };
                self.render_list();
            }
            Command::Post { id } => {
                let post = self
                    .client
                    .get_post(&id)
                    .await
                    .context("Failed to fetch post")?;
                self.view = View::PostDetail(post);
                self.render_list();
            }
            Command::Search { query } => match self.view {
                View::Authors => {
                    self.author_browse.set_query(query);
                    self.render_list();
                }
                View::Posts => {
                    self.post_browse.set_query(query);
                    self.render_list();
                }
                _ => println!("search applies to the 'authors' or 'posts' list"),
            },
            Command::Pick { index } => self.pick_suggestion(index),
            Command::Sort { key } => match &mut self.view {
                View::Posts => {
                    self.post_browse.toggle_sort(key);
                    self.render_list();
                }
                View::AuthorDetail { active_sort, .. } => {
                    *active_sort = if *active_sort == Some(key) {
                        None
                    } else {
                        Some(key)
                    };
                    self.render_list();
                }
                _ => println!("sort applies to a post list"),
            },
            Command::Page { number } => self.change_page(|browse| browse.set_page(number)),
            Command::Next => self.change_page(BrowseState::next_page),
            Command::Prev => self.change_page(BrowseState::prev_page),
            Command::New {
                author_id,
                title,
                description,
            } => {
                self.ensure_posts().await?;
                self.posts.begin_draft(NewPost {
                    title,
                    description,
                    author_id,
                });
                self.submit_draft().await;
            }
            Command::Retry => {
                if self.posts.draft().is_none() {
                    println!("no draft staged");
                } else {
                    self.submit_draft().await;
                }
            }
            Command::Edit {
                id,
                title,
                description,
            } => {
                self.ensure_posts().await?;
                match self
                    .posts
                    .update(&self.client, &id, PostPatch { title, description })
                    .await
                {
                    Ok(saved) => {
                        println!("saved {}", saved.id);
                        if matches!(&self.view, View::PostDetail(post) if post.id == saved.id) {
                            self.view = View::PostDetail(saved);
                            self.render_list();
                        }
                    }
                    Err(e) => println!("edit failed, post unchanged: {e}"),
                }
            }
            Command::Delete { id } => {
                self.ensure_posts().await?;
                match self.posts.delete(&self.client, &id).await {
                    Ok(()) => {
                        println!("deleted {id}");
                        if matches!(&self.view, View::Posts) {
                            self.render_list();
                        }
                    }
                    Err(e) => println!("delete failed, post kept: {e}"),
                }
            }
            Command::Likes { id } => {
                let likes = activity::likes_with_authors(&self.client, &id)
                    .await
                    .context("Failed to fetch likes")?;
                print!("{}", render::likes_list(&likes));
            }
            Command::Comments { id } => {
                let comments = activity::comments_with_authors(&self.client, &id)
                    .await
                    .context("Failed to fetch comments")?;
                print!("{}", render::comments_list(&comments));
            }
            Command::Refresh => {
                self.refresh_view().await?;
                self.render_list();
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => unreachable!("handled by the loop"),
        }
        Ok(())
    }

    async fn ensure_authors(&mut self) -> Result<()> {
        if self.authors.is_empty() {
            self.authors = self
                .client
                .list_authors()
                .await
                .context("Failed to fetch authors")?;
        }
        Ok(())
    }

    async fn ensure_posts(&mut self) -> Result<()> {
        if self.posts.posts().is_empty() {
            self.posts
                .refresh(&self.client)
                .await
                .context("Failed to fetch posts")?;
        }
        Ok(())
    }

    async fn refresh_view(&mut self) -> Result<()> {
        match &self.view {
            View::Authors => {
                self.authors = self
                    .client
                    .list_authors()
                    .await
                    .context("Failed to fetch authors")?;
            }
            View::Posts => {
                self.posts
                    .refresh(&self.client)
                    .await
                    .context("Failed to fetch posts")?;
            }
            View::AuthorDetail { author, .. } => {
                let id = author.id.clone();
                let author = self
                    .client
                    .get_author(&id)
                    .await
                    .context("Failed to fetch author")?;
                let posts = self
                    .client
                    .posts_by_author(&id)
                    .await
                    .context("Failed to fetch the author's posts")?;
                let active_sort = match &self.view {
                    View::AuthorDetail { active_sort, .. } => *active_sort,
                    _ => None,
                };
                self.view = View::AuthorDetail {
                    author,
                    posts,
                    active_sort,
                };
            }
            View::PostDetail(post) => {
                let post = self
                    .client
                    .get_post(&post.id)
                    .await
                    .context("Failed to fetch post")?;
                self.view = View::PostDetail(post);
            }
        }
        Ok(())
    }

    async fn submit_draft(&mut self) {
        match self.posts.submit_draft(&self.client).await {
            Ok(Some(created)) => {
                println!("created {}", created.id);
                self.view = View::Posts;
                self.render_list();
            }
            Ok(None) => println!("no draft staged"),
            Err(e) => println!("create failed: {e} (draft kept; 'retry' to resubmit)"),
        }
    }

    fn pick_suggestion(&mut self, index: usize) {
        match self.view {
            View::Authors => {
                let page = self.author_browse.visible(&self.authors);
                match page.suggestions.get(index - 1) {
                    Some(author) => {
                        self.author_browse.select_suggestion(author);
                        self.render_list();
                    }
                    None => println!("no suggestion {index}"),
                }
            }
            View::Posts => {
                let page = self.post_browse.visible_posts(self.posts.posts());
                match page.suggestions.get(index - 1) {
                    Some(post) => {
                        self.post_browse.select_suggestion(post);
                        self.render_list();
                    }
                    None => println!("no suggestion {index}"),
                }
            }
            _ => println!("pick applies to the 'authors' or 'posts' list"),
        }
    }

    fn change_page(&mut self, step: impl FnOnce(&mut BrowseState)) {
        match self.view {
            View::Authors => {
                step(&mut self.author_browse);
                self.render_list();
            }
            View::Posts => {
                step(&mut self.post_browse);
                self.render_list();
            }
            _ => println!("pagination applies to the 'authors' or 'posts' list"),
        }
    }

    fn render_list(&self) {
        match &self.view {
            View::Authors => {
                let page = self.author_browse.visible(&self.authors);
                print!(
                    "{}",
                    render::search_feedback(&page.suggestions, page.status, self.author_browse.query())
                );
                print!("{}", render::author_table(&page.items));
                print!("{}", render::page_footer(self.author_browse.page(), page.total_pages));
            }
            View::Posts => {
                let page = self.post_browse.visible_posts(self.posts.posts());
                print!(
                    "{}",
                    render::search_feedback(&page.suggestions, page.status, self.post_browse.query())
                );
                print!("{}", render::post_table(&page.items));
                print!("{}", render::page_footer(self.post_browse.page(), page.total_pages));
            }
            View::AuthorDetail {
                author,
                posts,
                active_sort,
            } => {
                print!("{}", render::author_card(author));
                let top = match active_sort {
                    Some(key) => sort_posts(posts, *key),
                    None => posts.clone(),
                };
                let shown = &top[..top.len().min(AUTHOR_TOP_POSTS)];
                if let Some(key) = active_sort {
                    println!("top posts by {}:", key.label());
                }
                print!("{}", render::post_table(shown));
            }
            View::PostDetail(post) => print!("{}", render::post_card(post)),
        }
    }
}
