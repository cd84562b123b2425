use crate::{
    abstract_trait::{
        AuthServiceTrait, DynHashing, DynJwtService, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    domain::{
        requests::{LoginRequest, RegisterRequest, Role},
        responses::{ApiResponse, AuthResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct AuthService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
}

impl AuthService {
    pub fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        hashing: DynHashing,
        jwt: DynJwtService,
    ) -> Self {
        Self {
            query,
            command,
            hashing,
            jwt,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        info!("📝 Registering user: {}", req.email);

        if self.query.find_by_email(&req.email).await?.is_some() {
            error!("❌ Registration rejected, email taken: {}", req.email);
            return Err(ServiceError::Repo(RepositoryError::AlreadyExists(
                "User with this email already exists".to_string(),
            )));
        }

        let password_hash = self.hashing.hash_password(&req.password).await?;
        let role = req.role.unwrap_or(Role::User);

        let user = self
            .command
            .create_user(&req.username, &req.email, &password_hash, role.as_str())
            .await?;

        // Signed in immediately after registering, no second login round trip.
        let token = self
            .jwt
            .generate_token(user.user_id, &user.username, &user.role)?;

        info!("✅ Registered user ID {} ({})", user.user_id, user.email);

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Registration successful".to_string(),
            data: AuthResponse {
                token,
                username: user.username,
                role: user.role,
            },
        })
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        info!("🔐 Attempting login for email: {}", req.email);

        // Unknown email and wrong password answer identically.
        let user = self
            .query
            .find_by_email(&req.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        self.hashing
            .compare_password(&user.password_hash, &req.password)
            .await?;

        let token = self
            .jwt
            .generate_token(user.user_id, &user.username, &user.role)?;

        info!("✅ Login successful for user ID {}", user.user_id);

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Login successful".to_string(),
            data: AuthResponse {
                token,
                username: user.username,
                role: user.role,
            },
        })
    }

    async fn me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "User fetched".to_string(),
            data: UserResponse::from(user),
        })
    }
}
