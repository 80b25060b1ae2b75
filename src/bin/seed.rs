use chrono::{Duration, Utc};
use clap::Parser;
use vistara::{
    auth::AuthService,
    config::DatabaseConfig,
    db,
    domain::{
        AnnouncementMediaType, AnnouncementRequest, CreateCommentRequest, CreateStoryRequest,
        EventRequest, NewStory, StoryMediaType, ROLE_ADMIN, ROLE_USER,
    },
    repository::{
        AnnouncementRepository, CommentRepository, EventRepository, NewUser, StoryRepository,
        SqliteAnnouncementRepository, SqliteCommentRepository, SqliteEventRepository,
        SqliteStoryRepository, SqliteUserRepository, UserRepository,
    },
};

/// Fills a database with an admin account and some demo content.
#[derive(Parser, Debug)]
#[command(name = "seed", version)]
struct Args {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://vistara.db?mode=rwc")]
    database_url: String,

    #[arg(long, default_value = "admin@vistara.local")]
    admin_email: String,

    #[arg(long, default_value = "admin1234")]
    admin_password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let db_pool = db::connect(&DatabaseConfig {
        url: args.database_url.clone(),
        max_connections: 5,
    })
    .await?;

    println!("📋 Running migrations...");
    db::migrate(&db_pool).await?;

    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());
    let comment_repo = SqliteCommentRepository::new(db_pool.clone());
    let story_repo = SqliteStoryRepository::new(db_pool.clone());
    let event_repo = SqliteEventRepository::new(db_pool.clone());

    let now = Utc::now();

    // Users
    println!("👥 Creating users...");

    let admin = user_repo.create(NewUser {
        name: "Admin".to_string(),
        email: args.admin_email.clone(),
        password_hash: AuthService::hash_password(&args.admin_password).await?,
        phone: None,
        role: ROLE_USER.to_string(),
    }).await?;
    user_repo.add_role(admin.id, ROLE_ADMIN).await?;
    println!("  ✅ Created admin user ({})", args.admin_email);

    user_repo.create(NewUser {
        name: "Priya Nair".to_string(),
        email: "priya@example.com".to_string(),
        password_hash: AuthService::hash_password("password123").await?,
        phone: Some("+91 98450 12345".to_string()),
        role: ROLE_USER.to_string(),
    }).await?;
    println!("  ✅ Created demo user (priya@example.com / password123)");

    // Announcements
    println!("📢 Creating announcements...");

    let welcome = announcement_repo.create(AnnouncementRequest {
        content: "Welcome to the new community board! Share news, photos and events here.".to_string(),
        author_name: "Admin".to_string(),
        media_type: Some(AnnouncementMediaType::Text),
        background_color: Some("#4f46e5".to_string()),
        ..Default::default()
    }.into_new(now - Duration::days(2))?).await?;

    announcement_repo.create(AnnouncementRequest {
        content: "The library will stay open until 9pm during exam week.".to_string(),
        author_name: "Priya Nair".to_string(),
        media_type: Some(AnnouncementMediaType::Text),
        background_color: Some("#059669".to_string()),
        ..Default::default()
    }.into_new(now - Duration::hours(5))?).await?;

    comment_repo.create(welcome.id, CreateCommentRequest {
        author: "Priya Nair".to_string(),
        text: "Looks great, thanks for setting this up!".to_string(),
    }, now - Duration::days(1)).await?;
    println!("  ✅ Created 2 announcements with comments");

    // Stories
    println!("📸 Creating stories...");

    story_repo.create(NewStory::from_request(CreateStoryRequest {
        media_content: "Good morning from the campus garden".to_string(),
        caption: Some("Spring is here".to_string()),
        author_name: "Priya Nair".to_string(),
        media_type: Some(StoryMediaType::Text),
        background_color: Some("#f59e0b".to_string()),
        ..Default::default()
    }, now - Duration::hours(2))?).await?;

    story_repo.create(NewStory::from_request(CreateStoryRequest {
        media_content: "Last call for the quiz night sign-ups".to_string(),
        author_name: "Admin".to_string(),
        media_type: Some(StoryMediaType::Text),
        ..Default::default()
    }, now - Duration::hours(23) - Duration::minutes(30))?).await?;
    println!("  ✅ Created 2 stories (one expiring soon)");

    // Events
    println!("📅 Creating events...");

    let quiz = event_repo.create(EventRequest {
        name: "Quiz Night".to_string(),
        category: Some("social".to_string()),
        start_date_time: Some(now + Duration::days(3)),
        end_date_time: Some(now + Duration::days(3) + Duration::hours(2)),
        location: Some("Main Hall".to_string()),
        description: Some("Teams of up to four. Prizes for the top three.".to_string()),
        email: Some("events@vistara.local".to_string()),
        ..Default::default()
    }).await?;
    event_repo.approve(quiz.id).await?;

    event_repo.create(EventRequest {
        name: "Robotics Workshop".to_string(),
        category: Some("workshop".to_string()),
        start_date_time: Some(now + Duration::days(10)),
        end_date_time: Some(now + Duration::days(10) + Duration::hours(4)),
        location: Some("Lab 2".to_string()),
        contact_number: Some("+91 80 4000 1234".to_string()),
        ..Default::default()
    }).await?;
    println!("  ✅ Created 2 events (one awaiting approval)");

    println!("🎉 Seeding complete!");

    Ok(())
}
