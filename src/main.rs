//! mygymbro - AI-powered gym routine builder for students

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use mygymbro::calc::{
    self, BodyMeasurements, ExerciseFrequency, FitnessLevel, Gender, Goal, Lifestyle,
};
use mygymbro::chat::{ChatClient, ChatMessage};
use mygymbro::equipment::EquipmentList;
use mygymbro::i18n::Language;
use mygymbro::parser::{self, ExerciseCard};
use mygymbro::prompts::{CustomWorkoutRequest, PlanKind};
use mygymbro::session::Session;
use mygymbro::store::{ProfileUpdate, UserStore};
use mygymbro::{auth, Error};

const USERS_PATH: &str = "users.json";
const EQUIPMENT_PATH: &str = "gym_equipment.csv";

#[derive(Parser)]
#[command(name = "mygymbro")]
#[command(author, version, about = "AI-powered gym routine builder for students")]
struct Cli {
    /// Path to the user store
    #[arg(long, env = "MYGYMBRO_USERS", default_value = USERS_PATH, global = true)]
    users: String,

    /// Path to the gym equipment sheet
    #[arg(long, env = "MYGYMBRO_EQUIPMENT", default_value = EQUIPMENT_PATH, global = true)]
    equipment: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        email: String,

        /// Password (min 8 chars, upper, lower, digit)
        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },

    /// Show or update the profile
    Profile {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        #[arg(long)]
        age: Option<u32>,

        /// Male, Female, or Other
        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        height_feet: Option<u32>,

        #[arg(long)]
        height_inches: Option<u32>,

        #[arg(long)]
        weight_lbs: Option<f64>,

        /// e.g. "Student or office worker"
        #[arg(long)]
        lifestyle: Option<String>,

        /// e.g. "Beginner"
        #[arg(long)]
        experience: Option<String>,

        /// e.g. "3x/week"
        #[arg(long)]
        frequency: Option<String>,

        /// Very poor .. Very good
        #[arg(long)]
        fitness: Option<String>,

        /// Comma-separated sports, e.g. "Basketball,Swimming"
        #[arg(long)]
        sports: Option<String>,

        #[arg(long)]
        bench_pr: Option<f64>,

        #[arg(long)]
        squat_pr: Option<f64>,

        /// Preferred chat language
        #[arg(long, value_enum)]
        language: Option<Language>,
    },

    /// Log current body weight
    Weight {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        /// New weight in pounds
        lbs: f64,
    },

    /// Record muscle measurements (inches)
    Measure {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        #[arg(long)]
        chest: Option<f64>,

        #[arg(long)]
        shoulders: Option<f64>,

        #[arg(long)]
        biceps_left: Option<f64>,

        #[arg(long)]
        biceps_right: Option<f64>,

        #[arg(long)]
        waist: Option<f64>,

        #[arg(long)]
        hips: Option<f64>,

        #[arg(long)]
        thigh_left: Option<f64>,

        #[arg(long)]
        thigh_right: Option<f64>,
    },

    /// Daily calories and macros from the profile
    Calories {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        /// weight-loss, maintenance, or bulk-up
        #[arg(long, default_value = "maintenance")]
        goal: String,
    },

    /// Estimated body-fat percentage
    Bodyfat {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        /// Waist circumference in cm (overrides stored measurement)
        #[arg(long)]
        waist_cm: Option<f64>,

        /// Neck circumference in cm
        #[arg(long)]
        neck_cm: Option<f64>,

        /// Hip circumference in cm (needed for non-male estimates)
        #[arg(long)]
        hip_cm: Option<f64>,
    },

    /// Show the gym equipment sheet
    Equipment,

    /// Generate a one-click workout plan
    Plan {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        #[arg(value_enum)]
        kind: PlanKind,
    },

    /// Generate a fully custom workout plan
    Custom {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,

        /// Comma-separated days, e.g. "Mon,Wed,Fri"
        #[arg(long, default_value = "Mon,Wed,Fri")]
        days: String,

        #[arg(long, default_value = "45 minutes")]
        duration: String,

        #[arg(long, default_value = "Build muscle / Gain strength")]
        goal: String,

        /// Comma-separated focus areas; empty means full body
        #[arg(long, default_value = "")]
        focus: String,

        #[arg(long, default_value = "Moderate intensity / Balanced")]
        style: String,

        #[arg(long, default_value = "Use whatever is available")]
        equipment_pref: String,

        #[arg(long, default_value = "Beginner")]
        experience: String,

        /// Injuries or limitations the plan must respect
        #[arg(long)]
        limitations: Option<String>,

        #[arg(long)]
        prefs: Option<String>,
    },

    /// Interactive chat with the workout assistant
    Chat {
        email: String,

        #[arg(env = "MYGYMBRO_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = UserStore::new(&cli.users);

    match cli.command {
        Commands::Signup { email, password, first_name, last_name } => {
            let profile = auth::signup(&store, &email, &password, &first_name, &last_name)?;
            println!("Account created for {}", profile.email);
        }

        Commands::Profile {
            email,
            password,
            age,
            gender,
            height_feet,
            height_inches,
            weight_lbs,
            lifestyle,
            experience,
            frequency,
            fitness,
            sports,
            bench_pr,
            squat_pr,
            language,
        } => {
            auth::login(&store, &email, &password)?;
            let update = ProfileUpdate {
                age,
                gender: gender.map(|g| Gender::from_label(&g).label().to_string()),
                height_feet,
                height_inches,
                weight_lbs,
                lifestyle,
                exercise_experience: experience,
                exercise_frequency: frequency,
                fitness_level: fitness,
                sports_activities: sports.map(|s| split_list(&s)),
                bench_press_pr: bench_pr,
                squat_pr,
                language: language.map(|l| l.label().to_string()),
            };

            let profile = if update.is_empty() {
                store.get_user(&email)?.ok_or(Error::InvalidCredentials)?
            } else {
                store.update_user(&email, |p| update.apply(p))?
            };

            println!("Profile: {} {} <{}>", profile.first_name, profile.last_name, profile.email);
            println!("{:-<50}", "");
            println!("Age:        {}", profile.age_or_default());
            println!("Gender:     {}", profile.gender_or_default());
            let (feet, inches) = profile.height_feet_inches();
            println!(
                "Height:     {:.1} cm ({feet}ft {inches}in)",
                profile.height_cm_or_default(),
            );
            println!(
                "Weight:     {:.1} kg ({:.1} lbs)",
                profile.weight_kg_or_default(),
                profile.weight_lbs_or_default(),
            );
            println!("Lifestyle:  {}", profile.lifestyle_or_default());
            println!("Experience: {}", profile.exercise_experience_or_default());
            println!("Frequency:  {}", profile.exercise_frequency_or_default());
            println!("Fitness:    {}", profile.fitness_level_or_default());
            if !profile.sports_activities.is_empty() {
                println!("Sports:     {}", profile.sports_activities.join(", "));
            }
            if let Some(pr) = profile.bench_press_pr {
                println!("Bench PR:   {pr} lbs");
            }
            if let Some(pr) = profile.squat_pr {
                println!("Squat PR:   {pr} lbs");
            }
            println!("Language:   {}", profile.preferences.language);
            println!("Workouts:   {} recorded", profile.workout_history.len());
        }

        Commands::Weight { email, password, lbs } => {
            auth::login(&store, &email, &password)?;
            let profile = store.update_user(&email, |p| p.set_weight_lbs(lbs))?;
            println!(
                "Weight updated: {:.1} lbs ({:.1} kg)",
                profile.weight_lbs_or_default(),
                profile.weight_kg_or_default(),
            );
        }

        Commands::Measure {
            email,
            password,
            chest,
            shoulders,
            biceps_left,
            biceps_right,
            waist,
            hips,
            thigh_left,
            thigh_right,
        } => {
            auth::login(&store, &email, &password)?;
            let profile = store.update_user(&email, |p| {
                let m = &mut p.muscle_measurements;
                if chest.is_some() {
                    m.chest = chest;
                }
                if shoulders.is_some() {
                    m.shoulders = shoulders;
                }
                if biceps_left.is_some() {
                    m.biceps_left = biceps_left;
                }
                if biceps_right.is_some() {
                    m.biceps_right = biceps_right;
                }
                if waist.is_some() {
                    m.waist = waist;
                }
                if hips.is_some() {
                    m.hips = hips;
                }
                if thigh_left.is_some() {
                    m.thigh_left = thigh_left;
                }
                if thigh_right.is_some() {
                    m.thigh_right = thigh_right;
                }
            })?;
            let m = &profile.muscle_measurements;
            println!("Measurements (inches):");
            println!("{:-<40}", "");
            for (name, value) in [
                ("Chest", m.chest),
                ("Shoulders", m.shoulders),
                ("Biceps (L)", m.biceps_left),
                ("Biceps (R)", m.biceps_right),
                ("Waist", m.waist),
                ("Hips", m.hips),
                ("Thigh (L)", m.thigh_left),
                ("Thigh (R)", m.thigh_right),
            ] {
                match value {
                    Some(v) => println!("{name:12} {v:.1}"),
                    None => println!("{name:12} -"),
                }
            }
        }

        Commands::Calories { email, password, goal } => {
            let profile = auth::login(&store, &email, &password)?;
            let goal = parse_goal(&goal);
            print_calories(&profile, goal);
        }

        Commands::Bodyfat { email, password, waist_cm, neck_cm, hip_cm } => {
            let profile = auth::login(&store, &email, &password)?;
            let gender = Gender::from_label(profile.gender_or_default());
            // stored tape measurements are inches, CLI flags are cm
            let stored = &profile.muscle_measurements;
            let measurements = BodyMeasurements {
                waist_cm: waist_cm.or(stored.waist.map(|v| v * 2.54)),
                neck_cm,
                hip_cm: hip_cm.or(stored.hips.map(|v| v * 2.54)),
            };
            let pct = calc::body_fat_percent(
                gender,
                profile.age_or_default(),
                profile.height_cm_or_default(),
                profile.weight_kg_or_default(),
                &measurements,
            );
            let band = calc::body_fat_band(gender, pct);
            println!("Estimated body fat: {pct:.1}% ({})", band.label());
            if measurements.waist_cm.is_none() || measurements.neck_cm.is_none() {
                println!("(BMI-based estimate; pass --waist-cm and --neck-cm for a tape-based one)");
            }
        }

        Commands::Equipment => {
            let list = EquipmentList::load(&cli.equipment);
            println!("Gym equipment ({})", list.path().display());
            println!("{:-<50}", "");
            println!("{}", list.summary());
        }

        Commands::Plan { email, password, kind } => {
            let profile = auth::login(&store, &email, &password)?;
            let mut session = Session::new(Language::English);
            session.login(profile.clone());
            let request = kind.request(&profile);
            run_workout_request(&store, &mut session, &cli.equipment, kind.slug(), &request).await;
        }

        Commands::Custom {
            email,
            password,
            days,
            duration,
            goal,
            focus,
            style,
            equipment_pref,
            experience,
            limitations,
            prefs,
        } => {
            let profile = auth::login(&store, &email, &password)?;
            let mut session = Session::new(Language::English);
            session.login(profile.clone());
            let custom = CustomWorkoutRequest {
                workout_days: split_list(&days),
                duration,
                primary_goal: goal,
                focus_areas: split_list(&focus),
                style,
                equipment_preference: equipment_pref,
                experience,
                limitations,
                additional_prefs: prefs,
            };
            let request = custom.request(&profile);
            run_workout_request(&store, &mut session, &cli.equipment, "custom", &request).await;
        }

        Commands::Chat { email, password } => {
            let profile = auth::login(&store, &email, &password)?;
            let mut session = Session::new(Language::English);
            session.login(profile);
            run_chat_repl(&store, &mut session, &cli.equipment).await?;
        }
    }

    Ok(())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_goal(raw: &str) -> Goal {
    match raw.trim().to_lowercase().as_str() {
        "weight-loss" | "weight loss" | "cut" => Goal::WeightLoss,
        "bulk-up" | "bulk up" | "bulk" => Goal::BulkUp,
        _ => Goal::Maintenance,
    }
}

fn print_calories(profile: &mygymbro::store::UserProfile, goal: Goal) {
    let gender = Gender::from_label(profile.gender_or_default());
    let age = profile.age_or_default();
    let bmr = calc::bmr(gender, age, profile.height_cm_or_default(), profile.weight_kg_or_default());
    let multiplier = calc::activity_multiplier(
        Lifestyle::from_label(profile.lifestyle_or_default()),
        ExerciseFrequency::from_label(profile.exercise_frequency_or_default()),
        FitnessLevel::from_label(profile.fitness_level_or_default()),
    );
    let maintenance = bmr * multiplier;
    let macros = calc::macros(maintenance, goal);
    let fitness = FitnessLevel::from_label(profile.fitness_level_or_default());
    let (hr_lo, hr_hi) = calc::heart_rate_range(age, fitness);

    println!("BMR:                {bmr:.1} kcal/day");
    println!("Activity factor:    {multiplier:.2}");
    println!("Maintenance:        {maintenance:.1} kcal/day");
    println!("Target:             {:.1} kcal/day", macros.calories);
    println!("{:-<40}", "");
    println!("Carbs:              {:.1} g", macros.carbs_g);
    println!("Protein:            {:.1} g", macros.protein_g);
    println!("Fat:                {:.1} g", macros.fat_g);
    println!("{:-<40}", "");
    println!("Fat-burning HR:     {hr_lo}-{hr_hi} bpm");
}

fn print_cards(cards: &[ExerciseCard]) {
    for (i, card) in cards.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, card.name);
        if let Some((sets, reps)) = card.sets_reps {
            println!("   Sets x Reps: {sets}x{reps}");
        }
        if let Some(rest) = &card.rest {
            println!("   Rest: {rest}");
        }
        if let Some(weight) = &card.weight {
            println!("   Weight: {weight}");
        }
        for tip in &card.form_tips {
            println!("   Tip: {tip}");
        }
    }
}

/// Send one workout request, stream the reply, show parsed exercise
/// cards, and record the workout in the profile history. API failures
/// degrade to the localized canned message.
async fn run_workout_request(
    store: &UserStore,
    session: &mut Session,
    equipment_path: &str,
    request_name: &str,
    request: &str,
) {
    let language = session.language;
    let reply = match send_to_assistant(session, equipment_path, request).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "assistant request failed");
            println!("{}", language.api_error_message());
            return;
        }
    };

    let cards = parser::parse_workout(&reply);
    if cards.is_empty() {
        // nothing structured found, the raw reply already printed
        println!();
    } else {
        println!();
        println!("Parsed workout ({} exercises):", cards.len());
        print_cards(&cards);
    }

    if let Some(profile) = session.profile() {
        let names = cards.iter().map(|c| c.name.clone()).collect();
        if let Err(e) = store.record_workout(&profile.email, request_name, names) {
            tracing::warn!(error = %e, "could not record workout history");
        }
    }
}

/// Push the request into the conversation and stream the reply to
/// stdout. The system prompt is rebuilt each call so language switches
/// and equipment edits take effect immediately.
async fn send_to_assistant(
    session: &mut Session,
    equipment_path: &str,
    request: &str,
) -> mygymbro::Result<String> {
    let client = ChatClient::from_env()?;
    let equipment = EquipmentList::load(equipment_path);
    let system = session.language.system_prompt(&equipment.summary());

    session.push_user(request);
    let mut messages = vec![ChatMessage::system(system)];
    messages.extend_from_slice(session.messages());

    println!("{}", session.language.loading_message());
    let mut stdout = io::stdout();
    let reply = client
        .complete_stream(&messages, |token| {
            print!("{token}");
            let _ = stdout.flush();
        })
        .await?;
    println!();
    session.push_assistant(reply.clone());
    Ok(reply)
}

/// Line-based chat loop. Slash commands cover the sidebar actions:
/// /plan <kind>, /calories, /clear, /lang <language>, /quit.
async fn run_chat_repl(
    store: &UserStore,
    session: &mut Session,
    equipment_path: &str,
) -> Result<()> {
    println!("MyGymBro chat. Type /quit to exit, /plan <kind> for a quick plan.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            let mut parts = command.splitn(2, ' ');
            let name = parts.next().unwrap_or("");
            let arg = parts.next().unwrap_or("").trim();
            match name {
                "quit" | "exit" => break,
                "clear" => {
                    session.clear_history();
                    println!("Conversation cleared.");
                }
                "lang" => {
                    let language = Language::from_label(arg);
                    session.set_language(language);
                    if let Some(profile) = session.profile() {
                        let email = profile.email.clone();
                        let updated = store.update_user(&email, |p| {
                            p.preferences.language = language.label().to_string();
                        })?;
                        session.refresh_profile(updated);
                    }
                    println!("Language set to {}.", language.label());
                }
                "calories" => {
                    if let Some(profile) = session.profile() {
                        print_calories(profile, parse_goal(arg));
                    }
                }
                "plan" => match PlanKind::from_str(arg, true) {
                    Ok(kind) => {
                        let Some(profile) = session.profile().cloned() else {
                            continue;
                        };
                        let request = kind.request(&profile);
                        run_workout_request(store, session, equipment_path, kind.slug(), &request)
                            .await;
                    }
                    Err(_) => println!("Unknown plan kind: {arg}"),
                },
                _ => println!("Unknown command: /{name}"),
            }
            continue;
        }

        // plain message
        let language = session.language;
        match send_to_assistant(session, equipment_path, input).await {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "assistant request failed");
                println!("{}", language.api_error_message());
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
