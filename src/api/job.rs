use log::info;
use rocket::{
    response::status::Created,
    serde::json::{Error as JsonError, Json},
    Route, State,
};

use crate::api::parse_id;
use crate::config::Config;
use crate::error::Result;
use crate::model::api::{
    job::{JobDescription, JobList, JobSpec},
    pagination::PaginationRequest,
};
use crate::store::Store;

pub fn routes() -> Vec<Route> {
    routes![list_jobs, create_job, get_job]
}

#[get("/jobs?<pagination..>")]
async fn list_jobs(
    pagination: PaginationRequest,
    store: &State<Store>,
    config: &State<Config>,
) -> Result<JobList> {
    let page = pagination.page(config.max_page_size())?;
    let (jobs, total) = store.jobs(page).await?;
    Ok(JobList::new(jobs, total))
}

#[post("/jobs", data = "<spec>")]
async fn create_job(
    spec: std::result::Result<Json<JobSpec>, JsonError<'_>>,
    store: &State<Store>,
) -> Result<Created<Json<JobDescription>>> {
    let posting = spec?.into_inner().into_posting()?;
    let job = store.create_job(posting).await?;
    info!("Created job {} ({} at {})", job.id, job.title, job.company);

    let location = format!("/api/jobs/{}", job.id);
    Ok(Created::new(location).body(Json(job.into())))
}

#[get("/jobs/<job_id>")]
async fn get_job(job_id: &str, store: &State<Store>) -> Result<Json<JobDescription>> {
    let job = store.job(parse_id(job_id, "Job")?).await?;
    Ok(Json(job.into()))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::{Client, LocalResponse},
        serde::json::{json, serde_json},
    };

    use crate::error::ErrorBody;
    use crate::model::{api::job::TOTAL_COUNT_HEADER, mongodb::Id};

    use super::*;

    async fn create(client: &Client, spec: &JobSpec) -> JobDescription {
        let response = client
            .post("/api/jobs")
            .header(ContentType::JSON)
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Created, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    async fn list(client: &Client, query: &str) -> (Vec<JobDescription>, u64) {
        let response = client.get(format!("/api/jobs{query}")).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let total = total_count(&response);
        let jobs = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        (jobs, total)
    }

    fn total_count(response: &LocalResponse<'_>) -> u64 {
        response
            .headers()
            .get_one(TOTAL_COUNT_HEADER)
            .unwrap()
            .parse()
            .unwrap()
    }

    #[backend_test]
    async fn create_then_list(client: Client) {
        let (jobs, total) = list(&client, "").await;
        assert!(jobs.is_empty());
        assert_eq!(total, 0);

        let spec = JobSpec {
            title: "Engineer".to_string(),
            description: "...".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
        };
        let created = create(&client, &spec).await;
        assert_eq!(created.title, spec.title);
        assert_eq!(created.description, spec.description);
        assert_eq!(created.company, spec.company);
        assert_eq!(created.location, spec.location);

        create(&client, &JobSpec::example2()).await;

        let (jobs, total) = list(&client, "").await;
        assert_eq!(total, 2);
        assert_eq!(jobs.len(), 2);
        assert!(jobs.contains(&created));
    }

    #[backend_test]
    async fn fetch_one(client: Client) {
        let created = create(&client, &JobSpec::example1()).await;

        let response = client
            .get(format!("/api/jobs/{}", created.id))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        let fetched: JobDescription =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(fetched, created);

        let response = client
            .get(format!("/api/jobs/{}", Id::new()))
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());

        let response = client.get("/api/jobs/12345").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test]
    async fn invalid_jobs_are_rejected(client: Client, store: Store) {
        let mut spec = JobSpec::example1();
        spec.company = "   ".to_string();
        let response = client
            .post("/api/jobs")
            .header(ContentType::JSON)
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::UnprocessableEntity, response.status());
        let body: ErrorBody = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body.error, "validation_failed");
        assert!(body.message.contains("company"));

        let response = client
            .post("/api/jobs")
            .header(ContentType::JSON)
            .body(json!({"title": "Engineer"}).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::UnprocessableEntity, response.status());

        let (jobs, total) = store.jobs(None).await.unwrap();
        assert!(jobs.is_empty());
        assert_eq!(total, 0);
    }

    #[backend_test]
    async fn bodies_are_json_whatever_the_content_type(client: Client, store: Store) {
        let body = json!(JobSpec::example1()).to_string();

        let response = client.post("/api/jobs").body(&body).dispatch().await;
        assert_eq!(Status::Created, response.status());

        let response = client
            .post("/api/jobs")
            .header(ContentType::Plain)
            .body(&body)
            .dispatch()
            .await;
        assert_eq!(Status::Created, response.status());

        let response = client.post("/api/jobs").body("title=Engineer").dispatch().await;
        assert_eq!(Status::UnprocessableEntity, response.status());
        let body: ErrorBody = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body.error, "validation_failed");

        let (_, total) = store.jobs(None).await.unwrap();
        assert_eq!(total, 2);
    }

    #[backend_test]
    async fn paginated_listing(client: Client) {
        for _ in 0..5 {
            create(&client, &JobSpec::example1()).await;
        }

        let (first, total) = list(&client, "?page_num=1&page_size=2").await;
        assert_eq!(first.len(), 2);
        assert_eq!(total, 5);
        let (second, _) = list(&client, "?page_num=2&page_size=2").await;
        assert_eq!(second.len(), 2);
        let (last, _) = list(&client, "?page_num=3&page_size=2").await;
        assert_eq!(last.len(), 1);

        let mut seen: Vec<_> = first
            .iter()
            .chain(&second)
            .chain(&last)
            .map(|job| job.id)
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5);

        let (everything, total) = list(&client, "?page_size=100").await;
        assert_eq!(everything.len(), 5);
        assert_eq!(total, 5);
    }

    #[backend_test]
    async fn bad_pagination(client: Client) {
        for query in ["?page_num=0", "?page_size=0", "?page_size=101"] {
            let response = client.get(format!("/api/jobs{query}")).dispatch().await;
            assert_eq!(Status::UnprocessableEntity, response.status(), "{query}");
        }

        let response = client.get("/api/jobs?page_num=0").dispatch().await;
        let body: ErrorBody = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body.error, "validation_failed");
        assert!(body.message.contains("page_num"));
    }
}
