//! Work history parser
//!
//! A line-driven state machine. Each line is classified (date, bullet,
//! title, company, description) and the classification together with the
//! current [`JobState`] decides what happens to the job being built:
//!
//! | state              | date line    | bullet     | strong title | any other line                          |
//! |--------------------|--------------|------------|--------------|-----------------------------------------|
//! | `Idle`             | open job     | open job   | open job     | open job, line is a tentative title     |
//! | `Title`            | set dates    | add bullet | new job \*   | company if company-like                 |
//! | `Company`, `Dates` | set dates    | add bullet | new job      | weak title: new job; long: description  |
//! | `Description`      | set dates †  | add bullet | new job      | weak title: new job; long: description  |
//! | `Responsibilities` | set dates †  | add bullet | new job ‡    | continues the last bullet               |
//!
//! \* unless the line also carries a company suffix, in which case it is the
//! company.
//!
//! † if the job already has dates, the line opens the next job instead
//! (company-first layouts such as `Acme Ltd | 2018 - 2020`).
//!
//! ‡ only role-keyword titles; a shape-only line here is far more often a
//! wrapped bullet than a heading, while a role keyword rarely ends a bullet.

use crate::processing::document::Job;
use crate::processing::patterns::{
    is_bullet, is_date_like, strip_bullet, COMPANY_SUFFIXES, DATE_RANGE, ROLE_KEYWORDS,
    SINGLE_DATE_LINE,
};
use log::debug;

const MAX_TITLE_CHARS: usize = 100;
const MAX_COMPANY_CHARS: usize = 120;
const SHORT_COMPANY_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Title,
    Company,
    Dates,
    Description,
    Responsibilities,
}

/// Role keyword anywhere in the line.
fn is_strong_title(line: &str) -> bool {
    line.chars().count() < MAX_TITLE_CHARS && ROLE_KEYWORDS.contains_word(line)
}

/// Shaped like a short heading: 2-6 words, capitalised, no punctuation that
/// would make it a sentence, location or contact line.
fn is_weak_title(line: &str) -> bool {
    let words = line.split_whitespace().count();
    line.chars().count() < MAX_TITLE_CHARS
        && !line.contains(['@', '.', ',', '|'])
        && (2..=6).contains(&words)
        && line.chars().next().is_some_and(char::is_uppercase)
}

fn is_title_like(line: &str) -> bool {
    is_strong_title(line) || is_weak_title(line)
}

fn is_company_like(line: &str) -> bool {
    COMPANY_SUFFIXES.contains_word(line)
        || (line.contains(',') && line.chars().count() < MAX_COMPANY_CHARS)
        || (line.chars().count() < SHORT_COMPANY_CHARS && !is_bullet(line) && !is_date_like(line))
}

/// Split a date line into the date token and whatever text surrounds it.
fn split_date_line(line: &str) -> (String, String) {
    let found = DATE_RANGE.find(line).or_else(|| SINGLE_DATE_LINE.find(line));
    match found {
        Some(m) => {
            let rest = format!("{} {}", &line[..m.start()], &line[m.end()..]);
            let rest = rest
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | '-' | '–' | '—' | '(' | ')'))
                .to_string();
            (m.as_str().trim().to_string(), rest)
        }
        None => (line.trim().to_string(), String::new()),
    }
}

struct JobParser {
    state: JobState,
    current: Option<Job>,
    jobs: Vec<Job>,
    description_min_chars: usize,
}

impl JobParser {
    fn new(description_min_chars: usize) -> Self {
        Self {
            state: JobState::Idle,
            current: None,
            jobs: Vec::new(),
            description_min_chars,
        }
    }

    fn flush(&mut self) {
        if let Some(job) = self.current.take() {
            if job.is_empty() {
                debug!("Dropping empty job record: {:?}", job);
            } else {
                self.jobs.push(job);
            }
        }
    }

    fn current_mut(&mut self) -> &mut Job {
        self.current.get_or_insert_with(Job::default)
    }

    fn start_job(&mut self, title: &str) {
        // A job opened by a leading date line takes the title instead.
        let untitled = self.current.as_ref().is_some_and(|j| {
            j.title.is_empty() && j.responsibilities.is_empty() && j.description.is_empty()
        });
        if !untitled {
            self.flush();
        }
        self.current_mut().title = title.to_string();
        self.state = JobState::Title;
    }

    /// Text around the date token becomes the company, but only on the job
    /// whose dates this line sets.
    fn on_date(&mut self, line: &str) {
        let (dates, rest) = split_date_line(line);
        let closes_current = matches!(self.state, JobState::Responsibilities | JobState::Description)
            && self.current.as_ref().is_some_and(|j| !j.dates.is_empty());
        if closes_current {
            debug!("[{:?}] date line opens next job: {}", self.state, line);
            self.flush();
        }

        let job = self.current_mut();
        if job.dates.is_empty() {
            job.dates = dates;
            if job.company.is_empty() && !rest.is_empty() {
                job.company = rest;
            }
        }
        self.state = JobState::Dates;
    }

    fn on_bullet(&mut self, line: &str) {
        let text = strip_bullet(line);
        self.current_mut().responsibilities.push(text);
        self.state = JobState::Responsibilities;
    }

    fn append_description(&mut self, line: &str) {
        let job = self.current_mut();
        if !job.description.is_empty() {
            job.description.push(' ');
        }
        job.description.push_str(line);
        self.state = JobState::Description;
    }

    fn continue_bullet(&mut self, line: &str) {
        if let Some(last) = self.current.as_mut().and_then(|j| j.responsibilities.last_mut()) {
            last.push(' ');
            last.push_str(line);
        }
    }

    fn feed(&mut self, line: &str) {
        if is_date_like(line) {
            debug!("[{:?}] date: {}", self.state, line);
            self.on_date(line);
            return;
        }
        if is_bullet(line) {
            debug!("[{:?}] bullet: {}", self.state, line);
            self.on_bullet(line);
            return;
        }

        match self.state {
            JobState::Idle => {
                debug!("[Idle] title: {}", line);
                self.start_job(line);
            }
            JobState::Title => {
                if is_strong_title(line) && !COMPANY_SUFFIXES.contains_word(line) {
                    debug!("[Title] new title: {}", line);
                    self.start_job(line);
                } else if is_company_like(line) {
                    debug!("[Title] company: {}", line);
                    self.current_mut().company = line.to_string();
                    self.state = JobState::Company;
                } else if line.chars().count() > self.description_min_chars {
                    self.append_description(line);
                }
            }
            JobState::Responsibilities => {
                if is_strong_title(line) {
                    debug!("[Responsibilities] new title: {}", line);
                    self.start_job(line);
                } else {
                    self.continue_bullet(line);
                }
            }
            JobState::Company | JobState::Dates | JobState::Description => {
                if is_title_like(line) {
                    debug!("[{:?}] new title: {}", self.state, line);
                    self.start_job(line);
                } else if line.chars().count() > self.description_min_chars {
                    self.append_description(line);
                } else {
                    debug!("[{:?}] ignored: {}", self.state, line);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Job> {
        self.flush();
        self.jobs
            .into_iter()
            .map(|mut job| {
                job.tidy();
                job
            })
            .filter(|job| !job.title.is_empty() || !job.company.is_empty())
            .collect()
    }
}

/// Turn the lines of an experience section into job records, in order.
pub fn parse_jobs(lines: &[String], description_min_chars: usize) -> Vec<Job> {
    let mut parser = JobParser::new(description_min_chars);
    for line in lines {
        parser.feed(line.trim());
    }
    parser.finish()
}
