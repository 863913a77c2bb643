//! Built-in pattern catalog.
//!
//! Each row is `(text, severity, category, description)`. Order matters:
//! scans dispatch patterns in catalog order.

use dighub_core::Severity::{self, High, Low, Medium};

/// Built-in search patterns, most severe first.
pub(crate) const BUILTIN_PATTERNS: &[(&str, Severity, &str, &str)] = &[
    // Credentials and private keys
    ("AWS_ACCESS_KEY_ID", High, "AWS", "AWS access key"),
    ("AWS_SECRET_ACCESS_KEY", High, "AWS", "AWS secret key"),
    ("filename:.env AWS_SECRET_ACCESS_KEY", High, "AWS", "AWS secret in .env"),
    ("filename:.env AWS_ACCESS_KEY_ID", High, "AWS", "AWS access key in .env"),
    ("ghp_", High, "GitHub", "GitHub personal access token"),
    ("gho_", High, "GitHub", "GitHub OAuth token"),
    ("ghu_", High, "GitHub", "GitHub user token"),
    ("ghr_", High, "GitHub", "GitHub refresh token"),
    ("filename:id_rsa", High, "SSH", "SSH private key"),
    ("filename:id_dsa", High, "SSH", "DSA private key"),
    ("filename:id_ed25519", High, "SSH", "Ed25519 private key"),
    ("extension:pem PRIVATE KEY", High, "Certificates", "PEM private key"),
    ("extension:key PRIVATE KEY", High, "Certificates", "Private key file"),
    ("filename:.env PRIVATE_KEY", High, "Encryption", "Private key in .env"),
    ("filename:.env SECRET_KEY", High, "Encryption", "Secret key in .env"),
    ("filename:.env JWT_SECRET", High, "Authentication", "JWT secret"),
    ("filename:.env DB_PASSWORD", High, "Database", "Database password"),
    ("DATABASE_URL", High, "Database", "Database URL"),
    ("filename:.env STRIPE_SECRET_KEY", High, "Payment", "Stripe secret key"),
    ("filename:.env PAYPAL_CLIENT_SECRET", High, "Payment", "PayPal secret"),
    ("filename:.env OPENAI_API_KEY", High, "API Keys", "OpenAI API key"),
    ("filename:.git-credentials", High, "Git", "Git credentials"),
    ("filename:.npmrc _auth", High, "NPM", "NPM authentication"),
    ("filename:.dockercfg", High, "Docker", "Docker config"),
    ("filename:.docker/config.json", High, "Docker", "Docker auth config"),
    ("filename:.env ADMIN_PASSWORD", High, "Admin", "Admin password"),
    ("filename:.env ROOT_PASSWORD", High, "Admin", "Root password"),
    ("filename:.env MASTER_KEY", High, "Encryption", "Master key"),
    // Webhooks and sensitive configuration
    ("discord.com/api/webhooks", Medium, "Webhooks", "Discord webhook"),
    ("discordapp.com/api/webhooks", Medium, "Webhooks", "Discord app webhook"),
    ("hooks.slack.com/services", Medium, "Webhooks", "Slack webhook"),
    ("outlook.office.com/webhook", Medium, "Webhooks", "Office 365 webhook"),
    ("teams.microsoft.com/webhook", Medium, "Webhooks", "Teams webhook"),
    ("filename:.env WEBHOOK_URL", Medium, "Webhooks", "Generic webhook URL"),
    ("filename:.env DISCORD_WEBHOOK", Medium, "Webhooks", "Discord webhook in .env"),
    ("filename:.env SLACK_WEBHOOK_URL", Medium, "Webhooks", "Slack webhook in .env"),
    ("filename:.env API_KEY", Medium, "API Keys", "Generic API key"),
    ("filename:.env TOKEN", Medium, "Tokens", "Generic token"),
    ("filename:.env MAIL_PASSWORD", Medium, "Email", "Email password"),
    ("filename:.env SMTP_PASSWORD", Medium, "Email", "SMTP password"),
    ("filename:.env SENDGRID_API_KEY", Medium, "Email", "SendGrid API key"),
    ("filename:.env MAILGUN_API_KEY", Medium, "Email", "Mailgun API key"),
    ("filename:.env TWILIO_AUTH_TOKEN", Medium, "SMS", "Twilio auth token"),
    ("filename:.env FIREBASE", Medium, "Firebase", "Firebase config"),
    ("filename:firebase.json", Medium, "Firebase", "Firebase JSON"),
    ("filename:firebase-adminsdk.json", Medium, "Firebase", "Firebase Admin SDK"),
    ("filename:google-services.json", Medium, "Google", "Google services config"),
    ("filename:client_secret.json", Medium, "OAuth", "OAuth client secret"),
    ("filename:.aws/credentials", Medium, "AWS", "AWS credentials file"),
    ("filename:credentials.json", Medium, "Credentials", "Generic credentials"),
    ("filename:secrets.yml", Medium, "Secrets", "Secrets YAML"),
    ("filename:secrets.yaml", Medium, "Secrets", "Secrets YAML"),
    ("filename:wp-config.php", Medium, "WordPress", "WordPress config"),
    ("filename:.env MONGO_URI", Medium, "Database", "MongoDB URI"),
    ("filename:.env MONGODB_URI", Medium, "Database", "MongoDB URI"),
    ("filename:.env POSTGRES_PASSWORD", Medium, "Database", "PostgreSQL password"),
    ("filename:.env MYSQL_ROOT_PASSWORD", Medium, "Database", "MySQL root password"),
    ("filename:.env REDIS_PASSWORD", Medium, "Database", "Redis password"),
    ("filename:database.yml", Medium, "Database", "Database YAML config"),
    ("filename:.github/workflows token", Medium, "CI/CD", "GitHub Actions token"),
    ("filename:.github/workflows GITHUB_TOKEN", Medium, "CI/CD", "GitHub token in workflow"),
    ("filename:.travis.yml", Medium, "CI/CD", "Travis CI config"),
    ("filename:.gitlab-ci.yml", Medium, "CI/CD", "GitLab CI config"),
    ("filename:terraform.tfvars", Medium, "Infrastructure", "Terraform variables"),
    ("filename:kubeconfig", Medium, "Kubernetes", "Kubernetes config"),
    ("filename:.kube/config", Medium, "Kubernetes", "Kubectl config"),
    ("filename:.env CLOUDFLARE_API_KEY", Medium, "CDN", "Cloudflare API key"),
    ("filename:.env VERCEL_API_KEY", Medium, "Hosting", "Vercel API key"),
    ("filename:.env NETLIFY_AUTH_TOKEN", Medium, "Hosting", "Netlify auth token"),
    ("filename:.env HEROKU_API_KEY", Medium, "Hosting", "Heroku API key"),
    // General configuration files
    ("filename:config.json api_key", Low, "Config", "API key in config"),
    ("filename:settings.py SECRET_KEY", Low, "Django", "Django secret key"),
    ("filename:application.yml token", Low, "Config", "Token in application config"),
    ("filename:settings.yaml token", Low, "Config", "Token in settings"),
    ("filename:.netrc password", Low, "Network", "Netrc password"),
    ("filename:.ssh/config", Low, "SSH", "SSH config"),
    ("filename:authorized_keys", Low, "SSH", "SSH authorized keys"),
    ("filename:package.json token", Low, "NPM", "Token in package.json"),
    ("filename:.npmrc authToken", Low, "NPM", "NPM auth token"),
    ("filename:.pypirc password", Low, "Python", "PyPI password"),
    ("filename:config.js password", Low, "Config", "Password in JS config"),
    ("filename:config.json password", Low, "Config", "Password in JSON config"),
    ("filename:settings.ini", Low, "Config", "INI settings file"),
    ("filename:application.properties", Low, "Config", "Properties file"),
    ("filename:.bash_history password", Low, "History", "Password in bash history"),
    ("filename:.zsh_history token", Low, "History", "Token in zsh history"),
    ("extension:log password", Low, "Logs", "Password in logs"),
    ("extension:log token", Low, "Logs", "Token in logs"),
    ("extension:log secret", Low, "Logs", "Secret in logs"),
    ("extension:json password", Low, "JSON", "Password in JSON"),
    ("extension:yaml password", Low, "YAML", "Password in YAML"),
    ("extension:txt secret", Low, "Text", "Secret in text file"),
    ("extension:ini password", Low, "INI", "Password in INI"),
    ("filename:debug.log", Low, "Logs", "Debug log file"),
    ("filename:error.log", Low, "Logs", "Error log file"),
    ("filename:local.env", Low, "Environment", "Local environment"),
    ("filename:prod.env", Low, "Environment", "Production environment"),
    ("filename:staging.env", Low, "Environment", "Staging environment"),
    ("filename:backup.sql", Low, "Backup", "SQL backup"),
    ("filename:dump.sql", Low, "Backup", "SQL dump"),
    ("filename:db.dump", Low, "Backup", "Database dump"),
    ("filename:backup.tar", Low, "Backup", "Tar backup"),
    ("extension:bak SECRET_KEY", Low, "Backup", "Secret in backup"),
    ("filename:.env~", Low, "Backup", "Backup .env file"),
    ("extension:swp SECRET", Low, "Temp", "Secret in swap file"),
    ("extension:orig SECRET", Low, "Temp", "Secret in orig file"),
];
