//! Application state for shared services

use std::sync::Arc;

use crate::domain::company::{Company, CompanyFilter, CompanyRepository};
use crate::domain::job::{Job, JobFilter, JobRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::{AuthService, JwtClaims, TokenSigner};
use crate::infrastructure::company::{
    CompanyService, CompanyWithJobs, CreateCompanyRequest, UpdateCompanyRequest,
};
use crate::infrastructure::job::{CreateJobRequest, JobService, UpdateJobRequest};
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub company_service: Arc<dyn CompanyServiceTrait>,
    pub job_service: Arc<dyn JobServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<User, DomainError>;
    async fn update(&self, username: &str, request: UpdateUserRequest)
        -> Result<User, DomainError>;
    async fn remove(&self, username: &str) -> Result<(), DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for login, registration and token checks
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<String, DomainError>;
    async fn register(&self, request: CreateUserRequest) -> Result<(User, String), DomainError>;
    fn verify(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// Trait for company service operations
#[async_trait::async_trait]
pub trait CompanyServiceTrait: Send + Sync {
    async fn get(&self, handle: &str) -> Result<CompanyWithJobs, DomainError>;
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError>;
    async fn create(&self, request: CreateCompanyRequest) -> Result<Company, DomainError>;
    async fn update(
        &self,
        handle: &str,
        request: UpdateCompanyRequest,
    ) -> Result<Company, DomainError>;
    async fn remove(&self, handle: &str) -> Result<(), DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for job service operations
#[async_trait::async_trait]
pub trait JobServiceTrait: Send + Sync {
    async fn get(&self, id: i32) -> Result<Job, DomainError>;
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError>;
    async fn create(&self, request: CreateJobRequest) -> Result<Job, DomainError>;
    async fn update(&self, id: i32, request: UpdateJobRequest) -> Result<Job, DomainError>;
    async fn remove(&self, id: i32) -> Result<(), DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        UserService::find_all(self).await
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        UserService::find_by_username(self, username).await
    }

    async fn update(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        UserService::update(self, username, request).await
    }

    async fn remove(&self, username: &str) -> Result<(), DomainError> {
        UserService::remove(self, username).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R, H, G> AuthServiceTrait for AuthService<R, H, G>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    G: TokenSigner + 'static,
{
    async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        AuthService::login(self, username, password).await
    }

    async fn register(&self, request: CreateUserRequest) -> Result<(User, String), DomainError> {
        AuthService::register(self, request).await
    }

    fn verify(&self, token: &str) -> Result<JwtClaims, DomainError> {
        AuthService::verify(self, token)
    }
}

#[async_trait::async_trait]
impl<C, J> CompanyServiceTrait for CompanyService<C, J>
where
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
{
    async fn get(&self, handle: &str) -> Result<CompanyWithJobs, DomainError> {
        CompanyService::get(self, handle).await
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        CompanyService::list(self, filter).await
    }

    async fn create(&self, request: CreateCompanyRequest) -> Result<Company, DomainError> {
        CompanyService::create(self, request).await
    }

    async fn update(
        &self,
        handle: &str,
        request: UpdateCompanyRequest,
    ) -> Result<Company, DomainError> {
        CompanyService::update(self, handle, request).await
    }

    async fn remove(&self, handle: &str) -> Result<(), DomainError> {
        CompanyService::remove(self, handle).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        CompanyService::count(self).await
    }
}

#[async_trait::async_trait]
impl<J: JobRepository + 'static> JobServiceTrait for JobService<J> {
    async fn get(&self, id: i32) -> Result<Job, DomainError> {
        JobService::get(self, id).await
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError> {
        JobService::list(self, filter).await
    }

    async fn create(&self, request: CreateJobRequest) -> Result<Job, DomainError> {
        JobService::create(self, request).await
    }

    async fn update(&self, id: i32, request: UpdateJobRequest) -> Result<Job, DomainError> {
        JobService::update(self, id, request).await
    }

    async fn remove(&self, id: i32) -> Result<(), DomainError> {
        JobService::remove(self, id).await
    }
}

impl AppState {
    /// Wire services over one set of repositories
    pub fn new<U, C, J, H, G>(
        users: Arc<U>,
        companies: Arc<C>,
        jobs: Arc<J>,
        hasher: Arc<H>,
        jwt: Arc<G>,
    ) -> Self
    where
        U: UserRepository + 'static,
        C: CompanyRepository + 'static,
        J: JobRepository + 'static,
        H: PasswordHasher + 'static,
        G: TokenSigner + 'static,
    {
        let user_service = Arc::new(UserService::new(users, hasher));
        let auth_service = Arc::new(AuthService::new(user_service.clone(), jwt));

        Self {
            user_service,
            auth_service,
            company_service: Arc::new(CompanyService::new(companies, jobs.clone())),
            job_service: Arc::new(JobService::new(jobs)),
        }
    }
}
